//! Selector abstraction for element addressing.
//!
//! A [`Selector`] identifies zero-or-more DOM nodes and is resolved lazily at
//! action/query time by the [`crate::driver::Driver`]. Child components derive
//! their selector by scoping the parent's selector with an additional
//! sub-query ([`Selector::within`]) or an index ([`Selector::nth`]). The
//! derivation is read-only; no resolved elements are copied.

use serde::{Deserialize, Serialize};

/// ARIA roles used for role-based addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A clickable button
    Button,
    /// A checkbox input
    Checkbox,
    /// An anchor link
    Link,
    /// A text input field
    Textbox,
}

impl Role {
    /// CSS selector covering the elements that carry this implicit role
    #[must_use]
    pub const fn css(&self) -> &'static str {
        match self {
            Self::Button => "button,[role=button]",
            Self::Checkbox => "input[type=checkbox]",
            Self::Link => "a,[role=link]",
            Self::Textbox => "input[type=text],input:not([type]),textarea",
        }
    }

    /// Role name as used in accessibility trees
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Checkbox => "checkbox",
            Self::Link => "link",
            Self::Textbox => "textbox",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query for locating elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g., ".todo-list")
    Css(String),
    /// Test ID selector (data-testid attribute)
    TestId(String),
    /// Text content selector (substring match)
    Text(String),
    /// Placeholder attribute selector
    Placeholder(String),
    /// Label text selector, resolving to the labelled control
    Label(String),
    /// ARIA role selector with optional accessible-name filter
    Role {
        /// The role to match
        role: Role,
        /// Accessible name filter (aria-label or text content)
        name: Option<String>,
    },
    /// Child query scoped to each element matched by the parent
    Within {
        /// Parent selector providing the scope
        parent: Box<Selector>,
        /// Child query evaluated inside each parent match
        child: Box<Selector>,
    },
    /// Index into the matches of a base selector (0-based)
    Nth {
        /// Base selector
        base: Box<Selector>,
        /// 0-based index; out of range matches zero elements
        index: usize,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a placeholder selector
    #[must_use]
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self::Placeholder(text.into())
    }

    /// Create a label selector
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Create a role selector without a name filter
    #[must_use]
    pub const fn role(role: Role) -> Self {
        Self::Role { role, name: None }
    }

    /// Create a role selector filtered by accessible name
    #[must_use]
    pub fn role_named(role: Role, name: impl Into<String>) -> Self {
        Self::Role {
            role,
            name: Some(name.into()),
        }
    }

    /// Derive a child selector scoped to this selector's matches
    #[must_use]
    pub fn within(&self, child: Self) -> Self {
        Self::Within {
            parent: Box::new(self.clone()),
            child: Box::new(child),
        }
    }

    /// Derive a selector for the nth match (0-based)
    ///
    /// An out-of-range index produces a selector matching zero elements,
    /// surfaced lazily as `ElementNotFound` on first use, not here.
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        Self::Nth {
            base: Box::new(self.clone()),
            index,
        }
    }

    /// Compile to a JavaScript expression evaluating to an Array of matches
    #[must_use]
    pub fn to_js_all(&self) -> String {
        self.js_all_from("document")
    }

    /// Compile to a JavaScript expression evaluating to the first match
    /// (or `undefined`)
    #[must_use]
    pub fn to_js_first(&self) -> String {
        format!("({})[0]", self.to_js_all())
    }

    /// Compile to a JavaScript expression evaluating to the match count
    #[must_use]
    pub fn to_js_count(&self) -> String {
        format!("({}).length", self.to_js_all())
    }

    fn js_all_from(&self, root: &str) -> String {
        match self {
            Self::Css(s) => format!("Array.from({root}.querySelectorAll({s:?}))"),
            Self::TestId(id) => {
                format!("Array.from({root}.querySelectorAll('[data-testid={id:?}]'))")
            }
            Self::Text(t) => format!(
                "Array.from({root}.querySelectorAll('*')).filter(el => el.textContent.includes({t:?}))"
            ),
            Self::Placeholder(p) => {
                format!("Array.from({root}.querySelectorAll('[placeholder={p:?}]'))")
            }
            Self::Label(l) => format!(
                "Array.from({root}.querySelectorAll('label')).filter(l => l.textContent.trim() === {l:?}).map(l => document.getElementById(l.htmlFor)).filter(Boolean)"
            ),
            Self::Role { role, name } => {
                let base = format!("Array.from({root}.querySelectorAll({:?}))", role.css());
                match name {
                    Some(n) => format!(
                        "{base}.filter(el => (el.getAttribute('aria-label') || el.textContent || '').includes({n:?}))"
                    ),
                    None => base,
                }
            }
            Self::Within { parent, child } => format!(
                "{}.flatMap(r => {})",
                parent.js_all_from(root),
                child.js_all_from("r")
            ),
            Self::Nth { base, index } => format!(
                "{}.slice({index}, {})",
                base.js_all_from(root),
                index + 1
            ),
        }
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::TestId(id) => write!(f, "testid={id}"),
            Self::Text(t) => write!(f, "text={t}"),
            Self::Placeholder(p) => write!(f, "placeholder={p}"),
            Self::Label(l) => write!(f, "label={l}"),
            Self::Role { role, name } => match name {
                Some(n) => write!(f, "role={role}[name={n}]"),
                None => write!(f, "role={role}"),
            },
            Self::Within { parent, child } => write!(f, "{parent} >> {child}"),
            Self::Nth { base, index } => write!(f, "{base}:nth({index})"),
        }
    }
}
