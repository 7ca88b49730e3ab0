//! Tarea: page-object toolkit for end-to-end testing of the TodoMVC
//! reference application.
//!
//! Tarea (Spanish: "task") wraps a browser-automation boundary with typed
//! page objects: a generic element handle, typed controls, composite
//! components, and one page facade, plus a persisted-state verifier and
//! seeded data generators.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  TodoPage facade                                         │
//! │    ├── Input / Checkbox / Counter / Button   (controls)  │
//! │    ├── TodoList ── TodoItem ── controls      (components)│
//! │    └── TodoFilter ── Link                                │
//! │          all over ElementHandle { Arc<dyn Driver>,       │
//! │                                   Selector }             │
//! ├──────────────────────────────────────────────────────────┤
//! │  Driver implementations                                  │
//! │    SimulatedTodoApp (default) │ CdpDriver (`browser`)    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every wrapper composes, never extends: a component holds an
//! [`ElementHandle`] and derives child selectors from its own. All state
//! lives behind the [`Driver`]; wrappers cache nothing.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

/// Composite page components: row, list, filter bar
pub mod components;

/// Typed control variants over the generic handle
pub mod controls;

/// The abstract driving-context boundary
pub mod driver;

/// Generic element wrapper
pub mod element;

/// Seeded test data generators
pub mod fixture;

/// The TodoMVC page facade
pub mod page;

/// Error taxonomy and result alias
pub mod result;

/// Element addressing
pub mod selector;

/// In-memory TodoMVC test double
pub mod sim;

/// Persisted-state verifier
pub mod storage;

/// Wait options and element states
pub mod wait;

/// Chromium driver over CDP
#[cfg(feature = "browser")]
pub mod cdp;

#[cfg(feature = "browser")]
pub use cdp::{BrowserConfig, CdpDriver};
pub use components::{Filter, TodoFilter, TodoItem, TodoList};
pub use controls::{Button, Checkbox, Counter, Input, Label, Link, List};
pub use driver::Driver;
pub use element::ElementHandle;
pub use fixture::{TodoGenerator, DEFAULT_TODOS};
pub use page::{PageObject, TodoPage, DEFAULT_URL};
pub use result::{TareaError, TareaResult};
pub use selector::{Role, Selector};
pub use sim::SimulatedTodoApp;
pub use storage::{StorageVerifier, TodoRecord, STORAGE_KEY};
pub use wait::{
    ElementState, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};
