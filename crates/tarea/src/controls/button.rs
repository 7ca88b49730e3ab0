//! Clickable button control.

use crate::element::ElementHandle;
use crate::result::TareaResult;

/// A clickable button
#[derive(Debug, Clone)]
pub struct Button {
    handle: ElementHandle,
}

impl Button {
    /// Wrap a handle as a button
    #[must_use]
    pub fn new(handle: ElementHandle) -> Self {
        Self { handle }
    }

    /// The underlying handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Click the button
    pub async fn click(&self) -> TareaResult<()> {
        self.handle.click().await
    }

    /// Visible button label
    pub async fn text(&self) -> TareaResult<String> {
        self.handle.text().await
    }

    /// Whether the button is rendered
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.handle.is_visible().await
    }

    /// Whether the button accepts clicks
    pub async fn is_enabled(&self) -> TareaResult<bool> {
        self.handle.driver().is_enabled(self.handle.selector()).await
    }

    /// Whether the button rejects clicks
    pub async fn is_disabled(&self) -> TareaResult<bool> {
        Ok(!self.is_enabled().await?)
    }

    /// Raw `disabled` attribute value, if present
    pub async fn disabled_attribute(&self) -> TareaResult<Option<String>> {
        self.handle.attribute("disabled").await
    }
}
