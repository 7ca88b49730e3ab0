//! Checkbox control with idempotent state setting.

use crate::element::ElementHandle;
use crate::result::TareaResult;

/// A checkbox input
#[derive(Debug, Clone)]
pub struct Checkbox {
    handle: ElementHandle,
}

impl Checkbox {
    /// Wrap a handle as a checkbox
    #[must_use]
    pub fn new(handle: ElementHandle) -> Self {
        Self { handle }
    }

    /// The underlying handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Whether the box is checked
    pub async fn is_checked(&self) -> TareaResult<bool> {
        self.handle.driver().is_checked(self.handle.selector()).await
    }

    /// Whether the box is unchecked
    pub async fn is_unchecked(&self) -> TareaResult<bool> {
        Ok(!self.is_checked().await?)
    }

    /// Whether the checkbox accepts interaction
    pub async fn is_enabled(&self) -> TareaResult<bool> {
        self.handle.driver().is_enabled(self.handle.selector()).await
    }

    /// Ensure the box is checked; no-op when it already is
    pub async fn check(&self) -> TareaResult<()> {
        self.handle
            .driver()
            .set_checked(self.handle.selector(), true)
            .await
    }

    /// Ensure the box is unchecked; no-op when it already is
    pub async fn uncheck(&self) -> TareaResult<()> {
        self.handle
            .driver()
            .set_checked(self.handle.selector(), false)
            .await
    }

    /// Flip the current state: read, then set the inverse
    pub async fn toggle(&self) -> TareaResult<()> {
        if self.is_checked().await? {
            self.uncheck().await
        } else {
            self.check().await
        }
    }

    /// Whether the checkbox is rendered
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.handle.is_visible().await
    }
}
