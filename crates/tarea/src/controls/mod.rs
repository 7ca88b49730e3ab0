//! Typed control variants.
//!
//! Each variant composes an [`crate::element::ElementHandle`] and narrows the
//! operation surface to what its control kind supports. Construction is by
//! wrapping, never by downcasting; a `Button` built over a selector that
//! actually matches a div fails at action time, not at construction.

mod button;
mod checkbox;
mod counter;
mod input;
mod label;
mod link;
mod list;

pub use button::Button;
pub use checkbox::Checkbox;
pub use counter::Counter;
pub use input::Input;
pub use label::Label;
pub use link::Link;
pub use list::List;
