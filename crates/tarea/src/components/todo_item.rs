//! Single todo row component.
//!
//! A row is a small state machine: Display (checkbox, title label, delete
//! button) and Editing (edit input replaces them). Transitions go through
//! the page's own affordances, never through direct model access.

use tracing::debug;

use crate::controls::{Button, Checkbox, Input, Label};
use crate::element::ElementHandle;
use crate::result::{TareaError, TareaResult};
use crate::selector::{Role, Selector};

/// One row in the todo list
#[derive(Debug, Clone)]
pub struct TodoItem {
    row: ElementHandle,
}

impl TodoItem {
    /// Wrap a row handle
    #[must_use]
    pub fn new(row: ElementHandle) -> Self {
        Self { row }
    }

    /// The row handle itself
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.row
    }

    /// Completion checkbox, present in Display state
    #[must_use]
    pub fn checkbox(&self) -> Checkbox {
        Checkbox::new(self.row.child(Selector::role(Role::Checkbox)))
    }

    /// Title label, present in Display state
    #[must_use]
    pub fn title_label(&self) -> Label {
        Label::new(self.row.child(Selector::test_id("todo-title")))
    }

    /// Edit input, present in Editing state only
    #[must_use]
    pub fn edit_input(&self) -> Input {
        Input::new(self.row.child(Selector::role_named(Role::Textbox, "Edit")))
    }

    /// Delete button, revealed on hover in Display state
    #[must_use]
    pub fn delete_button(&self) -> Button {
        Button::new(self.row.child(Selector::role_named(Role::Button, "Delete")))
    }

    /// Current title text
    pub async fn title(&self) -> TareaResult<String> {
        self.title_label().text().await
    }

    /// Whether the row carries the `completed` class
    pub async fn is_completed(&self) -> TareaResult<bool> {
        self.row.has_class("completed").await
    }

    /// Whether the row is in Editing state
    pub async fn is_editing(&self) -> TareaResult<bool> {
        self.row.has_class("editing").await
    }

    /// Whether the row is rendered under the current filter
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.row.is_visible().await
    }

    /// Set completion to the given state; idempotent
    ///
    /// # Errors
    ///
    /// `InvalidState` while the row is editing; the checkbox is not part of
    /// the Editing rendering and toggling there has no defined meaning.
    pub async fn set_completed(&self, completed: bool) -> TareaResult<()> {
        self.ensure_not_editing().await?;
        if completed {
            self.checkbox().check().await
        } else {
            self.checkbox().uncheck().await
        }
    }

    /// Mark the row completed; no-op when already completed
    pub async fn complete(&self) -> TareaResult<()> {
        self.set_completed(true).await
    }

    /// Mark the row not completed; no-op when already active
    pub async fn uncomplete(&self) -> TareaResult<()> {
        self.set_completed(false).await
    }

    /// Flip completion with a checkbox click
    ///
    /// # Errors
    ///
    /// `InvalidState` while the row is editing.
    pub async fn toggle(&self) -> TareaResult<()> {
        self.ensure_not_editing().await?;
        self.checkbox().toggle().await
    }

    async fn ensure_not_editing(&self) -> TareaResult<()> {
        if self.is_editing().await? {
            return Err(TareaError::InvalidState {
                message: "cannot toggle completion while the row is editing".to_string(),
            });
        }
        Ok(())
    }

    /// Enter Editing state by double-clicking the row.
    ///
    /// The transition is verified, not assumed: the edit input must become
    /// visible or the call fails.
    ///
    /// # Errors
    ///
    /// `InvalidState` when the edit input does not appear after the
    /// double-click.
    pub async fn start_editing(&self) -> TareaResult<()> {
        self.row.double_click().await?;
        if !self.edit_input().is_visible().await? {
            return Err(TareaError::InvalidState {
                message: "edit input did not appear after double-click".to_string(),
            });
        }
        debug!(selector = %self.row.selector(), "row entered editing state");
        Ok(())
    }

    /// Current edit buffer content; the row must be editing
    pub async fn edit_value(&self) -> TareaResult<String> {
        self.edit_input().value().await
    }

    /// Replace the edit buffer; the row must be editing
    pub async fn fill_edit(&self, text: &str) -> TareaResult<()> {
        self.edit_input().fill(text).await
    }

    /// Commit the edit buffer with Enter.
    ///
    /// The page trims the buffer; a trimmed-empty commit destroys the row.
    pub async fn commit_edit(&self) -> TareaResult<()> {
        self.edit_input().press("Enter").await
    }

    /// Commit the edit buffer by removing focus (blur-to-save)
    pub async fn commit_edit_by_blur(&self) -> TareaResult<()> {
        self.edit_input().blur().await
    }

    /// Cancel editing with Escape, reverting the title.
    ///
    /// A no-op when the row is not editing.
    pub async fn cancel_editing(&self) -> TareaResult<()> {
        if !self.is_editing().await? {
            return Ok(());
        }
        self.edit_input().press("Escape").await
    }

    /// Full edit flow: enter editing, replace the buffer, commit with Enter
    pub async fn rename(&self, new_title: &str) -> TareaResult<()> {
        self.start_editing().await?;
        self.fill_edit(new_title).await?;
        self.commit_edit().await
    }

    /// Delete the row via its hover-revealed button
    pub async fn delete(&self) -> TareaResult<()> {
        self.row.hover().await?;
        self.delete_button().click().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;
    use crate::sim::SimulatedTodoApp;
    use std::sync::Arc;

    fn item(app: &Arc<SimulatedTodoApp>, index: usize) -> TodoItem {
        TodoItem::new(ElementHandle::new(
            Arc::clone(app) as Arc<dyn Driver>,
            Selector::test_id("todo-item").nth(index),
        ))
    }

    mod completion_tests {
        use super::*;

        #[tokio::test]
        async fn test_set_completed_is_idempotent() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", false)]));
            let row = item(&app, 0);
            row.complete().await.unwrap();
            row.complete().await.unwrap();
            assert!(row.is_completed().await.unwrap());
            row.uncomplete().await.unwrap();
            assert!(!row.is_completed().await.unwrap());
        }

        #[tokio::test]
        async fn test_toggle_while_editing_is_invalid() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", false)]));
            let row = item(&app, 0);
            row.start_editing().await.unwrap();
            let err = row.toggle().await.unwrap_err();
            assert!(matches!(err, TareaError::InvalidState { .. }));
            let err = row.set_completed(true).await.unwrap_err();
            assert!(matches!(err, TareaError::InvalidState { .. }));
        }
    }

    mod editing_tests {
        use super::*;

        #[tokio::test]
        async fn test_rename_commits_trimmed_title() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("feed the cat", false)]));
            let row = item(&app, 0);
            row.rename("  feed the dog  ").await.unwrap();
            assert!(!row.is_editing().await.unwrap());
            assert_eq!(row.title().await.unwrap(), "feed the dog");
        }

        #[tokio::test]
        async fn test_empty_rename_destroys_row() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", false), ("b", false)]));
            item(&app, 0).rename("   ").await.unwrap();
            let remaining = app
                .count(&Selector::test_id("todo-item"))
                .await
                .unwrap();
            assert_eq!(remaining, 1);
            assert_eq!(item(&app, 0).title().await.unwrap(), "b");
        }

        #[tokio::test]
        async fn test_cancel_reverts_and_is_noop_when_not_editing() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("feed the cat", false)]));
            let row = item(&app, 0);
            // not editing yet, cancel must be a no-op
            row.cancel_editing().await.unwrap();
            row.start_editing().await.unwrap();
            row.fill_edit("feed the dog").await.unwrap();
            row.cancel_editing().await.unwrap();
            assert_eq!(row.title().await.unwrap(), "feed the cat");
        }

        #[tokio::test]
        async fn test_blur_commits_edit() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("feed the cat", false)]));
            let row = item(&app, 0);
            row.start_editing().await.unwrap();
            row.fill_edit("feed the dog").await.unwrap();
            row.commit_edit_by_blur().await.unwrap();
            assert_eq!(row.title().await.unwrap(), "feed the dog");
        }

        #[tokio::test]
        async fn test_edit_value_mirrors_title_on_entry() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("feed the cat", false)]));
            let row = item(&app, 0);
            row.start_editing().await.unwrap();
            assert_eq!(row.edit_value().await.unwrap(), "feed the cat");
        }
    }

    mod delete_tests {
        use super::*;

        #[tokio::test]
        async fn test_delete_removes_row() {
            let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", false), ("b", false)]));
            item(&app, 0).delete().await.unwrap();
            let remaining = app
                .count(&Selector::test_id("todo-item"))
                .await
                .unwrap();
            assert_eq!(remaining, 1);
        }
    }
}
