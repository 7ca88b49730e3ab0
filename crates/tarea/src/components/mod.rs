//! Composite page components.
//!
//! Components compose typed controls over derived selectors; none talks to
//! the driver except through its controls' handles.

mod todo_filter;
mod todo_item;
mod todo_list;

pub use todo_filter::{Filter, TodoFilter};
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
