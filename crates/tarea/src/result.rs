//! Result and error types for Tarea.

use thiserror::Error;

/// Result type for Tarea operations
pub type TareaResult<T> = Result<T, TareaError>;

/// Errors that can occur in Tarea
///
/// Components perform no local recovery or retry; every error surfaces
/// unchanged to the calling scenario, which is the sole place retry policy
/// (if any) belongs.
#[derive(Debug, Error)]
pub enum TareaError {
    /// Selector matched nothing when an element-returning operation required one
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector description
        selector: String,
    },

    /// A wait or poll exceeded its deadline
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Operation attempted against a component not in the state it presupposes
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    NavigationError {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Page-level error surfaced from the driving context
    #[error("Page error: {message}")]
    PageError {
        /// Error message
        message: String,
    },

    /// Script evaluation error
    #[error("Evaluation failed: {message}")]
    EvalError {
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunchError {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
