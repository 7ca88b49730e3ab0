//! Static text label control.

use crate::element::ElementHandle;
use crate::result::TareaResult;

/// A static text element
#[derive(Debug, Clone)]
pub struct Label {
    handle: ElementHandle,
}

impl Label {
    /// Wrap a handle as a label
    #[must_use]
    pub fn new(handle: ElementHandle) -> Self {
        Self { handle }
    }

    /// The underlying handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Text content; empty string when no text node
    pub async fn text(&self) -> TareaResult<String> {
        self.handle.text().await
    }

    /// Whether the label is rendered
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.handle.is_visible().await
    }

    /// The `for` attribute, if the label targets a control
    pub async fn for_attribute(&self) -> TareaResult<Option<String>> {
        self.handle.attribute("for").await
    }

    /// Whether the label's `for` attribute targets the given element id
    pub async fn is_associated_with(&self, id: &str) -> TareaResult<bool> {
        Ok(self.for_attribute().await?.as_deref() == Some(id))
    }

    /// Double-click the label
    pub async fn double_click(&self) -> TareaResult<()> {
        self.handle.double_click().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;
    use crate::sim::SimulatedTodoApp;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_title_label_text() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[("feed the cat", false)]));
        let label = Label::new(ElementHandle::new(
            app as Arc<dyn crate::driver::Driver>,
            Selector::test_id("todo-item")
                .nth(0)
                .within(Selector::test_id("todo-title")),
        ));
        assert!(label.is_visible().await.unwrap());
        assert_eq!(label.text().await.unwrap(), "feed the cat");
    }
}
