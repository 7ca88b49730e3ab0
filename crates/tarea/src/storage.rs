//! Persisted-state verifier over the page's localStorage.
//!
//! The verifier reads (and seeds) the persisted store; it never mutates the
//! UI. Waiting is poll-based because storage writes trail the UI mutation
//! that caused them.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::driver::Driver;
use crate::result::{TareaError, TareaResult};
use crate::wait::WaitOptions;

/// localStorage key the application persists under
pub const STORAGE_KEY: &str = "react-todos";

/// One persisted todo record, as serialized by the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Stable record id
    pub id: String,
    /// Todo title, trimmed by the application before persisting
    pub title: String,
    /// Completion flag
    pub completed: bool,
}

/// Reads and waits on the persisted todo store
pub struct StorageVerifier {
    driver: Arc<dyn Driver>,
    key: String,
}

impl std::fmt::Debug for StorageVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageVerifier")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl StorageVerifier {
    /// Create a verifier over the default application key
    #[must_use]
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self::with_key(driver, STORAGE_KEY)
    }

    /// Create a verifier over a custom key
    #[must_use]
    pub fn with_key(driver: Arc<dyn Driver>, key: impl Into<String>) -> Self {
        Self {
            driver,
            key: key.into(),
        }
    }

    /// The key this verifier reads
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current persisted records; a missing key reads as empty
    pub async fn snapshot(&self) -> TareaResult<Vec<TodoRecord>> {
        match self.driver.storage_get(&self.key).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Alias for [`snapshot`](Self::snapshot)
    pub async fn todos(&self) -> TareaResult<Vec<TodoRecord>> {
        self.snapshot().await
    }

    /// Seed the store with the given records
    pub async fn set_todos(&self, todos: &[TodoRecord]) -> TareaResult<()> {
        let json = serde_json::to_string(todos)?;
        self.driver.storage_set(&self.key, &json).await
    }

    /// Remove the store key entirely
    pub async fn clear(&self) -> TareaResult<()> {
        self.driver.storage_remove(&self.key).await
    }

    /// Poll until `predicate` holds over the persisted records.
    ///
    /// The predicate must be pure; it is re-evaluated against a fresh
    /// snapshot every poll interval until it holds or the deadline passes.
    ///
    /// # Errors
    ///
    /// `Timeout` when the deadline passes without the predicate holding.
    pub async fn wait_until<F>(&self, predicate: F, options: &WaitOptions) -> TareaResult<()>
    where
        F: Fn(&[TodoRecord]) -> bool + Send + Sync,
    {
        let start = Instant::now();
        loop {
            let snapshot = self.snapshot().await?;
            if predicate(&snapshot) {
                debug!(records = snapshot.len(), "storage predicate satisfied");
                return Ok(());
            }
            if start.elapsed() >= options.timeout() {
                return Err(TareaError::Timeout {
                    ms: options.timeout_ms,
                });
            }
            tokio::time::sleep(options.poll_interval()).await;
        }
    }

    /// Wait until exactly `expected` records are persisted
    pub async fn wait_for_count(&self, expected: usize, options: &WaitOptions) -> TareaResult<()> {
        self.wait_until(move |todos| todos.len() == expected, options)
            .await
    }

    /// Wait until exactly `expected` records are persisted as completed
    pub async fn wait_for_completed_count(
        &self,
        expected: usize,
        options: &WaitOptions,
    ) -> TareaResult<()> {
        self.wait_until(
            move |todos| todos.iter().filter(|t| t.completed).count() == expected,
            options,
        )
        .await
    }

    /// Wait until some record carries the given exact title
    pub async fn wait_for_title(&self, title: &str, options: &WaitOptions) -> TareaResult<()> {
        let title = title.to_string();
        self.wait_until(move |todos| todos.iter().any(|t| t.title == title), options)
            .await
    }

    /// Wait until the store holds no records
    pub async fn wait_until_empty(&self, options: &WaitOptions) -> TareaResult<()> {
        self.wait_until(<[TodoRecord]>::is_empty, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;
    use crate::sim::SimulatedTodoApp;

    fn verifier(app: Arc<SimulatedTodoApp>) -> StorageVerifier {
        StorageVerifier::new(app as Arc<dyn Driver>)
    }

    fn short() -> WaitOptions {
        WaitOptions::new().with_timeout(200).with_poll_interval(10)
    }

    #[tokio::test]
    async fn test_missing_key_reads_empty() {
        let app = Arc::new(SimulatedTodoApp::new());
        let v = StorageVerifier::new(Arc::clone(&app) as Arc<dyn Driver>);
        v.clear().await.unwrap();
        assert!(v.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_reflects_ui_mutations() {
        let app = Arc::new(SimulatedTodoApp::new());
        let input = Selector::placeholder("What needs to be done?");
        app.fill(&input, "buy some cheese").await.unwrap();
        app.press(&input, "Enter").await.unwrap();
        let v = verifier(app);
        let records = v.snapshot().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "buy some cheese");
        assert!(!records[0].completed);
    }

    #[tokio::test]
    async fn test_wait_for_count_succeeds() {
        let app = Arc::new(SimulatedTodoApp::with_todos(&[("a", false), ("b", true)]));
        let v = verifier(app);
        v.wait_for_count(2, &short()).await.unwrap();
        v.wait_for_completed_count(1, &short()).await.unwrap();
        v.wait_for_title("a", &short()).await.unwrap();
    }

    #[tokio::test]
    async fn test_wait_until_times_out() {
        let app = Arc::new(SimulatedTodoApp::new());
        let v = verifier(app);
        let err = v.wait_for_count(5, &short()).await.unwrap_err();
        assert!(matches!(err, TareaError::Timeout { ms: 200 }));
    }

    #[tokio::test]
    async fn test_set_todos_then_reload_renders() {
        let app = Arc::new(SimulatedTodoApp::new());
        let v = StorageVerifier::new(Arc::clone(&app) as Arc<dyn Driver>);
        v.set_todos(&[TodoRecord {
            id: "1".to_string(),
            title: "seeded".to_string(),
            completed: false,
        }])
        .await
        .unwrap();
        app.reload().await.unwrap();
        assert_eq!(
            app.count(&Selector::test_id("todo-item")).await.unwrap(),
            1
        );
        v.wait_until_empty(&short()).await.unwrap_err();
    }
}
