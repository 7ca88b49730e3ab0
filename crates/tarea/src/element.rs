//! Generic element wrapper over one selector.
//!
//! Wrappers hold (not extend) this handle: each typed variant and composite
//! component composes an [`ElementHandle`] and exposes only its own operation
//! set, so a variant can deviate from the generic semantics without fragile
//! inheritance.

use std::sync::Arc;

use crate::driver::Driver;
use crate::result::TareaResult;
use crate::selector::Selector;
use crate::wait::{ElementState, WaitOptions};

/// Wraps a single element selector bound to a driving context.
///
/// The selector is immutable after construction; the driver is shared by
/// reference across every wrapper in a page's object graph.
#[derive(Clone)]
pub struct ElementHandle {
    driver: Arc<dyn Driver>,
    selector: Selector,
}

impl std::fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementHandle")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

impl ElementHandle {
    /// Create a new handle for a selector
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>, selector: Selector) -> Self {
        Self { driver, selector }
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the driving context
    #[must_use]
    pub fn driver(&self) -> Arc<dyn Driver> {
        Arc::clone(&self.driver)
    }

    /// Derive a child handle scoped to this element
    #[must_use]
    pub fn child(&self, child: Selector) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
            selector: self.selector.within(child),
        }
    }

    /// Whether the element is currently rendered.
    ///
    /// Reflects current render state and may race with pending animations;
    /// callers must not assume immediate consistency after a mutating action.
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.driver.is_visible(&self.selector).await
    }

    /// Whether the element is currently hidden (or matches nothing)
    pub async fn is_hidden(&self) -> TareaResult<bool> {
        Ok(!self.is_visible().await?)
    }

    /// Text content; empty string, never null, if no text node
    pub async fn text(&self) -> TareaResult<String> {
        Ok(self
            .driver
            .text_content(&self.selector)
            .await?
            .unwrap_or_default())
    }

    /// Attribute value, or `None` if the attribute is not present
    pub async fn attribute(&self, name: &str) -> TareaResult<Option<String>> {
        self.driver.attribute(&self.selector, name).await
    }

    /// Whether the class attribute contains the given name.
    ///
    /// This is a substring check, NOT a token-exact match: a class name that
    /// is a substring of another class will false-positive (e.g. querying
    /// "completed" matches an element classed "completed-soon"). Kept for
    /// behavioral fidelity with the scenarios driving this toolkit.
    pub async fn has_class(&self, name: &str) -> TareaResult<bool> {
        let class = self.attribute("class").await?;
        Ok(class.is_some_and(|c| c.contains(name)))
    }

    /// Click the element; waits for the input event dispatch only, not for
    /// resulting UI settlement
    pub async fn click(&self) -> TareaResult<()> {
        self.driver.click(&self.selector).await
    }

    /// Double-click the element
    pub async fn double_click(&self) -> TareaResult<()> {
        self.driver.double_click(&self.selector).await
    }

    /// Hover over the element
    pub async fn hover(&self) -> TareaResult<()> {
        self.driver.hover(&self.selector).await
    }

    /// Block until the element is visible, or fail with `Timeout`
    pub async fn wait_for_visible(&self, timeout_ms: Option<u64>) -> TareaResult<()> {
        self.wait_for(ElementState::Visible, timeout_ms).await
    }

    /// Block until the element is hidden, or fail with `Timeout`
    pub async fn wait_for_hidden(&self, timeout_ms: Option<u64>) -> TareaResult<()> {
        self.wait_for(ElementState::Hidden, timeout_ms).await
    }

    async fn wait_for(&self, state: ElementState, timeout_ms: Option<u64>) -> TareaResult<()> {
        let options = match timeout_ms {
            Some(ms) => WaitOptions::new().with_timeout(ms),
            None => WaitOptions::default(),
        };
        self.driver
            .wait_for_state(&self.selector, state, &options)
            .await
    }
}
