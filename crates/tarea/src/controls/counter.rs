//! Numeric counter control.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::ElementHandle;
use crate::result::{TareaError, TareaResult};

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap_or_else(|_| unreachable!()))
}

/// A text element carrying an embedded count, e.g. "3 items left"
#[derive(Debug, Clone)]
pub struct Counter {
    handle: ElementHandle,
}

impl Counter {
    /// Wrap a handle as a counter
    #[must_use]
    pub fn new(handle: ElementHandle) -> Self {
        Self { handle }
    }

    /// The underlying handle
    #[must_use]
    pub const fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Full counter text, e.g. "1 item left"
    pub async fn text(&self) -> TareaResult<String> {
        self.handle.text().await
    }

    /// First digit run in the text, parsed; `None` when no digits
    pub async fn numeric_value(&self) -> TareaResult<Option<usize>> {
        let text = self.text().await?;
        Ok(digits_re()
            .find(&text)
            .and_then(|m| m.as_str().parse().ok()))
    }

    /// Numeric value, failing when the text carries no number
    ///
    /// # Errors
    ///
    /// `InvalidState` when no digit run is present.
    pub async fn count(&self) -> TareaResult<usize> {
        let text = self.text().await?;
        digits_re()
            .find(&text)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| TareaError::InvalidState {
                message: format!("counter text {text:?} carries no number"),
            })
    }

    /// Whether the text's number equals `expected`
    pub async fn contains_number(&self, expected: usize) -> TareaResult<bool> {
        Ok(self.numeric_value().await? == Some(expected))
    }

    /// Whether the full text contains the given substring
    pub async fn contains_text(&self, needle: &str) -> TareaResult<bool> {
        Ok(self.text().await?.contains(needle))
    }

    /// Whether the text is empty or whitespace only
    pub async fn is_blank(&self) -> TareaResult<bool> {
        Ok(self.text().await?.trim().is_empty())
    }

    /// Whether the counter is rendered
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.handle.is_visible().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Selector;
    use crate::sim::SimulatedTodoApp;
    use std::sync::Arc;

    fn counter(app: Arc<SimulatedTodoApp>) -> Counter {
        Counter::new(ElementHandle::new(
            app as Arc<dyn crate::driver::Driver>,
            Selector::test_id("todo-count"),
        ))
    }

    #[tokio::test]
    async fn test_count_extracts_number() {
        let c = counter(Arc::new(SimulatedTodoApp::with_todos(&[
            ("a", false),
            ("b", false),
            ("c", true),
        ])));
        assert_eq!(c.text().await.unwrap(), "2 items left");
        assert_eq!(c.count().await.unwrap(), 2);
        assert_eq!(c.numeric_value().await.unwrap(), Some(2));
        assert!(c.contains_number(2).await.unwrap());
        assert!(c.contains_text("items left").await.unwrap());
        assert!(!c.is_blank().await.unwrap());
    }

    #[tokio::test]
    async fn test_singular_phrasing() {
        let c = counter(Arc::new(SimulatedTodoApp::with_todos(&[("a", false)])));
        assert_eq!(c.text().await.unwrap(), "1 item left");
        assert_eq!(c.count().await.unwrap(), 1);
    }
}
