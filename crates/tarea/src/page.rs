//! TodoMVC page facade.
//!
//! [`TodoPage`] wires the components together and exposes task-level
//! operations. It carries no state and no algorithm beyond sequencing;
//! everything observable lives in the page behind the driver.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::components::{Filter, TodoFilter, TodoList};
use crate::controls::{Button, Checkbox, Counter, Input};
use crate::driver::Driver;
use crate::element::ElementHandle;
use crate::result::TareaResult;
use crate::selector::{Role, Selector};
use crate::wait::DEFAULT_WAIT_TIMEOUT_MS;

/// Default TodoMVC deployment exercised by the scenarios
pub const DEFAULT_URL: &str = "https://demo.playwright.dev/todomvc";

/// Contract every page facade satisfies
#[async_trait]
pub trait PageObject: Send + Sync {
    /// URL (or prefix) this page lives at
    fn url_pattern(&self) -> &str;

    /// Deadline for [`wait_for_load`](Self::wait_for_load)
    fn load_timeout_ms(&self) -> u64 {
        DEFAULT_WAIT_TIMEOUT_MS
    }

    /// Whether the page's landmark element is rendered
    async fn is_loaded(&self) -> TareaResult<bool>;

    /// Block until the page's landmark element renders, or `Timeout`
    async fn wait_for_load(&self) -> TareaResult<()>;
}

/// Facade over one TodoMVC page instance
pub struct TodoPage {
    driver: Arc<dyn Driver>,
    url: String,
}

impl std::fmt::Debug for TodoPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoPage")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl TodoPage {
    /// Bind a page facade to a driving context at the default URL
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self::with_url(driver, DEFAULT_URL)
    }

    /// Bind a page facade at a custom URL
    #[must_use]
    pub fn with_url(driver: Arc<dyn Driver>, url: impl Into<String>) -> Self {
        Self {
            driver,
            url: url.into(),
        }
    }

    /// The shared driving context
    #[must_use]
    pub fn driver(&self) -> Arc<dyn Driver> {
        Arc::clone(&self.driver)
    }

    fn handle(&self, selector: Selector) -> ElementHandle {
        ElementHandle::new(Arc::clone(&self.driver), selector)
    }

    // ------------------------------------------------------------------
    // Component accessors
    // ------------------------------------------------------------------

    /// The new-todo input at the top of the page
    #[must_use]
    pub fn new_todo_input(&self) -> Input {
        Input::new(self.handle(Selector::placeholder("What needs to be done?")))
    }

    /// The mark-all-complete toggle
    #[must_use]
    pub fn toggle_all(&self) -> Checkbox {
        Checkbox::new(self.handle(Selector::label("Mark all as complete")))
    }

    /// The todo list collection
    #[must_use]
    pub fn todo_list(&self) -> TodoList {
        TodoList::new(self.handle(Selector::css(".todo-list")))
    }

    /// The filter bar
    #[must_use]
    pub fn filter_bar(&self) -> TodoFilter {
        TodoFilter::new(self.handle(Selector::css(".filters")))
    }

    /// The items-left counter
    #[must_use]
    pub fn counter(&self) -> Counter {
        Counter::new(self.handle(Selector::test_id("todo-count")))
    }

    /// The clear-completed button
    #[must_use]
    pub fn clear_completed_button(&self) -> Button {
        Button::new(self.handle(Selector::role_named(Role::Button, "Clear completed")))
    }

    // ------------------------------------------------------------------
    // Task-level operations
    // ------------------------------------------------------------------

    /// Navigate to the page and wait for it to render
    pub async fn open(&self) -> TareaResult<()> {
        debug!(url = %self.url, "opening todo page");
        self.driver.goto(&self.url).await?;
        self.wait_for_load().await
    }

    /// Add one todo through the new-todo input
    pub async fn add_todo(&self, title: &str) -> TareaResult<()> {
        self.new_todo_input().submit(title).await
    }

    /// Add todos sequentially; list order follows slice order
    pub async fn add_todos(&self, titles: &[&str]) -> TareaResult<()> {
        for title in titles {
            self.add_todo(title).await?;
        }
        Ok(())
    }

    /// Mark every row completed via the toggle-all control
    pub async fn mark_all_as_completed(&self) -> TareaResult<()> {
        self.toggle_all().check().await
    }

    /// Mark every row not completed via the toggle-all control
    pub async fn mark_all_as_incomplete(&self) -> TareaResult<()> {
        self.toggle_all().uncheck().await
    }

    /// Whether toggle-all reports checked (every row completed)
    pub async fn is_toggle_all_checked(&self) -> TareaResult<bool> {
        self.toggle_all().is_checked().await
    }

    /// Number of rows currently rendered
    pub async fn todo_count(&self) -> TareaResult<usize> {
        self.todo_list().count().await
    }

    /// Number of rendered rows marked completed
    pub async fn completed_count(&self) -> TareaResult<usize> {
        self.todo_list().completed_count().await
    }

    /// Number of rendered rows not yet completed
    pub async fn active_count(&self) -> TareaResult<usize> {
        self.todo_list().active_count().await
    }

    /// Full counter text, e.g. "2 items left"
    pub async fn counter_text(&self) -> TareaResult<String> {
        self.counter().text().await
    }

    /// Count reported by the counter element
    pub async fn items_left(&self) -> TareaResult<usize> {
        self.counter().count().await
    }

    /// Switch the list to the given filter
    pub async fn set_filter(&self, filter: Filter) -> TareaResult<()> {
        self.filter_bar().set_filter(filter).await
    }

    /// The currently selected filter
    pub async fn active_filter(&self) -> TareaResult<Filter> {
        self.filter_bar().get_active_filter().await
    }

    /// Click clear-completed, removing every completed row
    pub async fn clear_completed(&self) -> TareaResult<()> {
        self.clear_completed_button().click().await
    }

    /// Whether the clear-completed button is rendered
    pub async fn is_clear_completed_visible(&self) -> TareaResult<bool> {
        self.clear_completed_button().is_visible().await
    }

    // ------------------------------------------------------------------
    // Driver delegation
    // ------------------------------------------------------------------

    /// Reload the page, re-rendering from persisted state
    pub async fn reload(&self) -> TareaResult<()> {
        self.driver.reload().await
    }

    /// Go back in browser history
    pub async fn go_back(&self) -> TareaResult<()> {
        self.driver.go_back().await
    }

    /// Evaluate a script expression in the page
    pub async fn evaluate(&self, script: &str) -> TareaResult<serde_json::Value> {
        self.driver.evaluate(script).await
    }
}

#[async_trait]
impl PageObject for TodoPage {
    fn url_pattern(&self) -> &str {
        &self.url
    }

    async fn is_loaded(&self) -> TareaResult<bool> {
        self.new_todo_input().is_visible().await
    }

    async fn wait_for_load(&self) -> TareaResult<()> {
        self.new_todo_input()
            .handle()
            .wait_for_visible(Some(self.load_timeout_ms()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedTodoApp;

    fn page() -> (Arc<SimulatedTodoApp>, TodoPage) {
        let app = Arc::new(SimulatedTodoApp::new());
        let page = TodoPage::with_url(
            Arc::clone(&app) as Arc<dyn Driver>,
            "http://localhost/todomvc",
        );
        (app, page)
    }

    #[tokio::test]
    async fn test_open_waits_for_landmark() {
        let (_app, page) = page();
        page.open().await.unwrap();
        assert!(page.is_loaded().await.unwrap());
        assert_eq!(page.url_pattern(), "http://localhost/todomvc");
    }

    #[tokio::test]
    async fn test_add_todos_preserves_order() {
        let (_app, page) = page();
        page.open().await.unwrap();
        page.add_todos(&["buy some cheese", "feed the cat"])
            .await
            .unwrap();
        assert_eq!(page.todo_count().await.unwrap(), 2);
        assert!(page
            .todo_list()
            .has_titles(&["buy some cheese", "feed the cat"])
            .await
            .unwrap());
        assert!(page.new_todo_input().is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_all_and_uncheck_one() {
        let (_app, page) = page();
        page.open().await.unwrap();
        page.add_todos(&["a", "b"]).await.unwrap();
        page.mark_all_as_completed().await.unwrap();
        assert!(page.is_toggle_all_checked().await.unwrap());
        page.todo_list().item(0).uncomplete().await.unwrap();
        assert!(!page.is_toggle_all_checked().await.unwrap());
    }

    #[tokio::test]
    async fn test_counter_and_clear_completed() {
        let (_app, page) = page();
        page.open().await.unwrap();
        page.add_todos(&["a", "b", "c"]).await.unwrap();
        assert_eq!(page.items_left().await.unwrap(), 3);
        assert!(!page.is_clear_completed_visible().await.unwrap());
        page.todo_list().item(1).complete().await.unwrap();
        assert_eq!(page.items_left().await.unwrap(), 2);
        assert!(page.is_clear_completed_visible().await.unwrap());
        page.clear_completed().await.unwrap();
        assert_eq!(page.todo_count().await.unwrap(), 2);
        assert!(!page.is_clear_completed_visible().await.unwrap());
    }

    #[tokio::test]
    async fn test_filter_switching() {
        let (_app, page) = page();
        page.open().await.unwrap();
        page.add_todos(&["a", "b"]).await.unwrap();
        page.todo_list().item(0).complete().await.unwrap();
        page.set_filter(Filter::Active).await.unwrap();
        assert_eq!(page.todo_count().await.unwrap(), 1);
        assert_eq!(page.active_filter().await.unwrap(), Filter::Active);
        page.set_filter(Filter::All).await.unwrap();
        assert_eq!(page.todo_count().await.unwrap(), 2);
    }
}
