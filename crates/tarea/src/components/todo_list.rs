//! Todo list collection component.
//!
//! Aggregate operations are sequential and non-atomic: they iterate the
//! currently rendered rows one driver call at a time, so a failure midway
//! leaves earlier mutations in place.

use tracing::debug;

use crate::components::TodoItem;
use crate::controls::List;
use crate::element::ElementHandle;
use crate::result::{TareaError, TareaResult};
use crate::selector::Selector;

/// The list of todo rows
#[derive(Debug, Clone)]
pub struct TodoList {
    list: List,
}

impl TodoList {
    /// Wrap the list container handle
    #[must_use]
    pub fn new(root: ElementHandle) -> Self {
        Self {
            list: List::new(root, Selector::test_id("todo-item")),
        }
    }

    /// The underlying list control
    #[must_use]
    pub const fn list(&self) -> &List {
        &self.list
    }

    /// Row component at `index` (0-based, lazy derivation)
    #[must_use]
    pub fn item(&self, index: usize) -> TodoItem {
        TodoItem::new(self.list.item(index))
    }

    /// Number of rows currently rendered
    pub async fn count(&self) -> TareaResult<usize> {
        self.list.count().await
    }

    /// Whether no rows are rendered
    pub async fn is_empty(&self) -> TareaResult<bool> {
        self.list.is_empty().await
    }

    /// Titles of every rendered row, in DOM order
    pub async fn all_titles(&self) -> TareaResult<Vec<String>> {
        let mut titles = Vec::new();
        for i in 0..self.count().await? {
            titles.push(self.item(i).title().await?);
        }
        Ok(titles)
    }

    /// Whether the rendered titles equal `expected`, in order
    pub async fn has_titles(&self, expected: &[&str]) -> TareaResult<bool> {
        Ok(self.all_titles().await? == expected)
    }

    /// Row with the given exact title
    ///
    /// # Errors
    ///
    /// `ElementNotFound` when no rendered row carries that title.
    pub async fn item_by_title(&self, title: &str) -> TareaResult<TodoItem> {
        for i in 0..self.count().await? {
            let item = self.item(i);
            if item.title().await? == title {
                return Ok(item);
            }
        }
        Err(TareaError::ElementNotFound {
            selector: format!("todo-item[title={title}]"),
        })
    }

    /// Rendered rows currently marked completed
    pub async fn completed_items(&self) -> TareaResult<Vec<TodoItem>> {
        self.items_where(true).await
    }

    /// Rendered rows not yet completed
    pub async fn active_items(&self) -> TareaResult<Vec<TodoItem>> {
        self.items_where(false).await
    }

    async fn items_where(&self, completed: bool) -> TareaResult<Vec<TodoItem>> {
        let mut out = Vec::new();
        for i in 0..self.count().await? {
            let item = self.item(i);
            if item.is_completed().await? == completed {
                out.push(item);
            }
        }
        Ok(out)
    }

    /// Number of rendered rows marked completed
    pub async fn completed_count(&self) -> TareaResult<usize> {
        Ok(self.completed_items().await?.len())
    }

    /// Number of rendered rows not yet completed
    pub async fn active_count(&self) -> TareaResult<usize> {
        Ok(self.active_items().await?.len())
    }

    /// Mark every rendered row completed, one row at a time
    pub async fn mark_all_as_completed(&self) -> TareaResult<()> {
        self.set_all(true).await
    }

    /// Mark every rendered row not completed, one row at a time
    pub async fn mark_all_as_incomplete(&self) -> TareaResult<()> {
        self.set_all(false).await
    }

    async fn set_all(&self, completed: bool) -> TareaResult<()> {
        let n = self.count().await?;
        debug!(rows = n, completed, "setting completion across the list");
        for i in 0..n {
            self.item(i).set_completed(completed).await?;
        }
        Ok(())
    }

    /// Delete every rendered completed row.
    ///
    /// Re-scans after each deletion so index derivations never go stale.
    pub async fn delete_completed_items(&self) -> TareaResult<()> {
        loop {
            let n = self.count().await?;
            let mut deleted = false;
            for i in 0..n {
                let item = self.item(i);
                if item.is_completed().await? {
                    item.delete().await?;
                    deleted = true;
                    break;
                }
            }
            if !deleted {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedTodoApp;
    use std::sync::Arc;

    fn todo_list(app: &Arc<SimulatedTodoApp>) -> TodoList {
        TodoList::new(ElementHandle::new(
            Arc::clone(app) as Arc<dyn crate::driver::Driver>,
            Selector::css(".todo-list"),
        ))
    }

    #[tokio::test]
    async fn test_titles_preserve_order() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[
            ("buy some cheese", false),
            ("feed the cat", false),
            ("book a doctors appointment", false),
        ]));
        let list = todo_list(&app);
        assert!(list
            .has_titles(&[
                "buy some cheese",
                "feed the cat",
                "book a doctors appointment"
            ])
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_item_by_title() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", false), ("b", true)]));
        let list = todo_list(&app);
        let b = list.item_by_title("b").await.unwrap();
        assert!(b.is_completed().await.unwrap());
        let err = list.item_by_title("missing").await.unwrap_err();
        assert!(matches!(err, TareaError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_counts_split_by_completion() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[
            ("a", false),
            ("b", true),
            ("c", false),
        ]));
        let list = todo_list(&app);
        assert_eq!(list.completed_count().await.unwrap(), 1);
        assert_eq!(list.active_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mark_all_then_delete_completed() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[
            ("a", false),
            ("b", false),
        ]));
        let list = todo_list(&app);
        list.mark_all_as_completed().await.unwrap();
        assert_eq!(list.completed_count().await.unwrap(), 2);
        list.delete_completed_items().await.unwrap();
        assert!(list.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_all_incomplete() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", true), ("b", true)]));
        let list = todo_list(&app);
        list.mark_all_as_incomplete().await.unwrap();
        assert_eq!(list.completed_count().await.unwrap(), 0);
    }
}
