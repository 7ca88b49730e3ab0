//! Filter bar component.

use tracing::warn;

use crate::controls::Link;
use crate::element::ElementHandle;
use crate::result::TareaResult;
use crate::selector::{Role, Selector};

/// Which subset of rows the list renders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Every row
    #[default]
    All,
    /// Rows not yet completed
    Active,
    /// Completed rows only
    Completed,
}

impl Filter {
    /// Link text as rendered in the filter bar
    #[must_use]
    pub const fn link_text(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// All three filters in bar order
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::All, Self::Active, Self::Completed]
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.link_text())
    }
}

/// The three-link filter bar at the bottom of the list
#[derive(Debug, Clone)]
pub struct TodoFilter {
    bar: ElementHandle,
}

impl TodoFilter {
    /// Wrap the filter bar container handle
    #[must_use]
    pub fn new(bar: ElementHandle) -> Self {
        Self { bar }
    }

    /// Link control for one filter
    #[must_use]
    pub fn link(&self, filter: Filter) -> Link {
        Link::new(
            self.bar
                .child(Selector::role_named(Role::Link, filter.link_text())),
        )
    }

    /// Activate a filter by clicking its link
    pub async fn set_filter(&self, filter: Filter) -> TareaResult<()> {
        self.link(filter).click().await
    }

    /// Show every row
    pub async fn show_all(&self) -> TareaResult<()> {
        self.set_filter(Filter::All).await
    }

    /// Show only rows not yet completed
    pub async fn show_active(&self) -> TareaResult<()> {
        self.set_filter(Filter::Active).await
    }

    /// Show only completed rows
    pub async fn show_completed(&self) -> TareaResult<()> {
        self.set_filter(Filter::Completed).await
    }

    /// Whether the given filter's link carries the `selected` class
    pub async fn is_selected(&self, filter: Filter) -> TareaResult<bool> {
        self.link(filter).is_active().await
    }

    /// Whether the All link is selected
    pub async fn is_all_selected(&self) -> TareaResult<bool> {
        self.is_selected(Filter::All).await
    }

    /// Whether the Active link is selected
    pub async fn is_active_selected(&self) -> TareaResult<bool> {
        self.is_selected(Filter::Active).await
    }

    /// Whether the Completed link is selected
    pub async fn is_completed_selected(&self) -> TareaResult<bool> {
        self.is_selected(Filter::Completed).await
    }

    /// The currently selected filter.
    ///
    /// Falls back to `Filter::All` when no link reports the `selected`
    /// class, which also masks a bar that failed to render; a warning is
    /// logged when the fallback fires.
    pub async fn get_active_filter(&self) -> TareaResult<Filter> {
        for filter in Filter::all() {
            if self.is_selected(filter).await? {
                return Ok(filter);
            }
        }
        warn!("no filter link reports selected, falling back to All");
        Ok(Filter::All)
    }

    /// Whether the bar is rendered
    pub async fn is_visible(&self) -> TareaResult<bool> {
        self.bar.is_visible().await
    }
}
