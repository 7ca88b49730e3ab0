//! Homogeneous item list control.

use crate::element::ElementHandle;
use crate::result::TareaResult;
use crate::selector::Selector;

/// A container of repeated item elements
#[derive(Debug, Clone)]
pub struct List {
    handle: ElementHandle,
    item: Selector,
}

impl List {
    /// Wrap a container handle; `item` locates one item within it
    #[must_use]
    pub fn new(handle: ElementHandle, item: Selector) -> Self {
        Self { handle, item }
    }

    /// The container handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Selector matching every item in the container
    #[must_use]
    pub fn items_selector(&self) -> Selector {
        self.handle.selector().within(self.item.clone())
    }

    /// Number of items currently rendered
    pub async fn count(&self) -> TareaResult<usize> {
        self.handle.driver().count(&self.items_selector()).await
    }

    /// Whether the list has no items
    pub async fn is_empty(&self) -> TareaResult<bool> {
        Ok(self.count().await? == 0)
    }

    /// Whether the list currently renders exactly `expected` items
    pub async fn has_item_count(&self, expected: usize) -> TareaResult<bool> {
        Ok(self.count().await? == expected)
    }

    /// Handle for the item at `index` (0-based)
    ///
    /// Derivation is lazy: an out-of-range index surfaces as
    /// `ElementNotFound` on first use, not here.
    #[must_use]
    pub fn item(&self, index: usize) -> ElementHandle {
        ElementHandle::new(self.handle.driver(), self.items_selector().nth(index))
    }

    /// Handles for every item currently rendered, in DOM order.
    ///
    /// The returned handles are index-based and go stale when rows are
    /// inserted or removed; re-materialize after mutations.
    pub async fn all_items(&self) -> TareaResult<Vec<ElementHandle>> {
        let n = self.count().await?;
        Ok((0..n).map(|i| self.item(i)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedTodoApp;
    use std::sync::Arc;

    fn todo_list(app: Arc<SimulatedTodoApp>) -> List {
        List::new(
            ElementHandle::new(
                app as Arc<dyn crate::driver::Driver>,
                Selector::css(".todo-list"),
            ),
            Selector::test_id("todo-item"),
        )
    }

    #[tokio::test]
    async fn test_count_and_items() {
        let list = todo_list(Arc::new(SimulatedTodoApp::with_todos(&[
            ("a", false),
            ("b", true),
        ])));
        assert_eq!(list.count().await.unwrap(), 2);
        assert!(!list.is_empty().await.unwrap());
        let items = list.all_items().await.unwrap();
        assert_eq!(items.len(), 2);
        let title = items[1].child(Selector::test_id("todo-title"));
        assert_eq!(title.text().await.unwrap(), "b");
    }

    #[tokio::test]
    async fn test_out_of_range_item_is_lazy() {
        let list = todo_list(Arc::new(SimulatedTodoApp::new()));
        // no error at derivation time
        let ghost = list.item(7);
        assert!(ghost.is_hidden().await.unwrap());
    }
}
