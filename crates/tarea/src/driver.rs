//! Driver - the abstract Driving Context boundary.
//!
//! All locator queries and actions execute through a [`Driver`]. The trait is
//! consumed, not reimplemented: swapping implementations (CDP, simulation)
//! must not change component behavior.
//!
//! Within one scenario the driver is mutable shared state across every
//! wrapper instantiated against it; access is serialized by sequential
//! awaiting, so implementations take `&self` and handle interior mutability.
//! Concurrent scenarios must use independent driver instances.

use crate::result::TareaResult;
use crate::selector::Selector;
use crate::wait::{ElementState, WaitOptions};

use async_trait::async_trait;

/// Abstract browser-automation boundary
///
/// # Implementations
///
/// - [`crate::sim::SimulatedTodoApp`] - in-memory test double, no browser
/// - `CdpDriver` (feature `browser`) - real Chromium via CDP
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigate to URL
    async fn goto(&self, url: &str) -> TareaResult<()>;

    /// Reload the current page, re-rendering from persisted state
    async fn reload(&self) -> TareaResult<()>;

    /// Go back in history
    async fn go_back(&self) -> TareaResult<()>;

    /// Get current URL
    async fn current_url(&self) -> TareaResult<String>;

    /// Get the document title
    async fn title(&self) -> TareaResult<String>;

    /// Count elements matching the selector
    async fn count(&self, selector: &Selector) -> TareaResult<usize>;

    /// Whether the first match is rendered; `false` when nothing matches
    async fn is_visible(&self, selector: &Selector) -> TareaResult<bool>;

    /// Text content of the first match; `None` when nothing matches
    async fn text_content(&self, selector: &Selector) -> TareaResult<Option<String>>;

    /// Attribute value of the first match; `None` when absent
    ///
    /// # Errors
    ///
    /// `ElementNotFound` when the selector matches nothing.
    async fn attribute(&self, selector: &Selector, name: &str) -> TareaResult<Option<String>>;

    /// Current value of the first matching input
    async fn input_value(&self, selector: &Selector) -> TareaResult<String>;

    /// Whether the first matching checkbox is checked
    async fn is_checked(&self, selector: &Selector) -> TareaResult<bool>;

    /// Whether the first match is enabled (not carrying `disabled`)
    async fn is_enabled(&self, selector: &Selector) -> TareaResult<bool>;

    /// Click the first match
    async fn click(&self, selector: &Selector) -> TareaResult<()>;

    /// Double-click the first match
    async fn double_click(&self, selector: &Selector) -> TareaResult<()>;

    /// Hover over the first match
    async fn hover(&self, selector: &Selector) -> TareaResult<()>;

    /// Replace the value of the first matching input (does not append)
    async fn fill(&self, selector: &Selector, text: &str) -> TareaResult<()>;

    /// Press a key (e.g. "Enter", "Escape") with the first match focused
    async fn press(&self, selector: &Selector, key: &str) -> TareaResult<()>;

    /// Set the checked state of the first matching checkbox; idempotent
    async fn set_checked(&self, selector: &Selector, checked: bool) -> TareaResult<()>;

    /// Focus the first match
    async fn focus(&self, selector: &Selector) -> TareaResult<()>;

    /// Remove focus from the first match
    async fn blur(&self, selector: &Selector) -> TareaResult<()>;

    /// Block until the first match reaches the given state, or `Timeout`
    async fn wait_for_state(
        &self,
        selector: &Selector,
        state: ElementState,
        options: &WaitOptions,
    ) -> TareaResult<()>;

    /// Evaluate a script expression in the target document
    async fn evaluate(&self, script: &str) -> TareaResult<serde_json::Value>;

    /// Read a key from the page's persisted store
    async fn storage_get(&self, key: &str) -> TareaResult<Option<String>>;

    /// Write a key into the page's persisted store
    async fn storage_set(&self, key: &str, value: &str) -> TareaResult<()>;

    /// Remove a key from the page's persisted store
    async fn storage_remove(&self, key: &str) -> TareaResult<()>;
}
