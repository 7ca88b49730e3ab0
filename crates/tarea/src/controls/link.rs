//! Navigation link control.

use crate::element::ElementHandle;
use crate::result::TareaResult;

/// An anchor link
#[derive(Debug, Clone)]
pub struct Link {
    handle: ElementHandle,
}

impl Link {
    /// Wrap a handle as a link
    #[must_use]
    pub fn new(handle: ElementHandle) -> Self {
        Self { handle }
    }

    /// The underlying handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Click the link
    pub async fn click(&self) -> TareaResult<()> {
        self.handle.click().await
    }

    /// Visible link text
    pub async fn text(&self) -> TareaResult<String> {
        self.handle.text().await
    }

    /// The href attribute, if any
    pub async fn href(&self) -> TareaResult<Option<String>> {
        self.handle.attribute("href").await
    }

    /// Whether the link carries the `selected` class
    pub async fn is_active(&self) -> TareaResult<bool> {
        self.handle.has_class("selected").await
    }

    /// Whether the link does not carry the `selected` class
    pub async fn is_inactive(&self) -> TareaResult<bool> {
        Ok(!self.is_active().await?)
    }

    /// Whether the link is rendered
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.handle.is_visible().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{Role, Selector};
    use crate::sim::SimulatedTodoApp;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_click_activates_link() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", false)]));
        let driver = Arc::clone(&app) as Arc<dyn crate::driver::Driver>;
        let active = Link::new(ElementHandle::new(
            Arc::clone(&driver),
            Selector::role_named(Role::Link, "Active"),
        ));
        let all = Link::new(ElementHandle::new(
            driver,
            Selector::role_named(Role::Link, "All"),
        ));
        assert!(!active.is_active().await.unwrap());
        active.click().await.unwrap();
        assert!(active.is_active().await.unwrap());
        assert!(!all.is_active().await.unwrap());
        assert_eq!(active.href().await.unwrap().as_deref(), Some("#/active"));
    }
}
