//! Text input control.

use crate::element::ElementHandle;
use crate::result::TareaResult;

/// A text input field
#[derive(Debug, Clone)]
pub struct Input {
    handle: ElementHandle,
}

impl Input {
    /// Wrap a handle as a text input
    #[must_use]
    pub fn new(handle: ElementHandle) -> Self {
        Self { handle }
    }

    /// The underlying handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Replace the input value (does not append to existing content)
    pub async fn fill(&self, text: &str) -> TareaResult<()> {
        self.handle.driver().fill(self.handle.selector(), text).await
    }

    /// Current value of the input
    pub async fn value(&self) -> TareaResult<String> {
        self.handle.driver().input_value(self.handle.selector()).await
    }

    /// Whether the input currently holds no text
    pub async fn is_empty(&self) -> TareaResult<bool> {
        Ok(self.value().await?.is_empty())
    }

    /// Press a key with the input focused (e.g. "Enter", "Escape")
    pub async fn press(&self, key: &str) -> TareaResult<()> {
        self.handle.driver().press(self.handle.selector(), key).await
    }

    /// Fill then submit with Enter
    pub async fn submit(&self, text: &str) -> TareaResult<()> {
        self.fill(text).await?;
        self.press("Enter").await
    }

    /// Clear the input value
    pub async fn clear(&self) -> TareaResult<()> {
        self.fill("").await
    }

    /// Focus the input
    pub async fn focus(&self) -> TareaResult<()> {
        self.handle.driver().focus(self.handle.selector()).await
    }

    /// Remove focus from the input
    pub async fn blur(&self) -> TareaResult<()> {
        self.handle.driver().blur(self.handle.selector()).await
    }

    /// Placeholder attribute, if any
    pub async fn placeholder(&self) -> TareaResult<Option<String>> {
        self.handle.attribute("placeholder").await
    }

    /// Whether the input is rendered
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.handle.is_visible().await
    }
}
