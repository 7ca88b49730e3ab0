//! Simulated TodoMVC application for driver-free testing.
//!
//! [`SimulatedTodoApp`] implements [`Driver`] against an in-memory model of
//! the TodoMVC page: rows with a Display/Editing split, the three filters,
//! the counter, toggle-all, clear-completed, and localStorage persistence.
//! It exists strictly as the test double standing in for the real driving
//! context; it is not a reimplementation of the application as a product.
//!
//! Like the real page, mutations settle synchronously from the caller's
//! point of view and are mirrored into the persisted store after every
//! change, so the persisted-state verifier observes the same snapshots a
//! browser run would.

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::components::Filter;
use crate::driver::Driver;
use crate::result::{TareaError, TareaResult};
use crate::selector::{Role, Selector};
use crate::storage::{TodoRecord, STORAGE_KEY};
use crate::wait::{ElementState, WaitOptions};

const NEW_TODO_PLACEHOLDER: &str = "What needs to be done?";
const TOGGLE_ALL_LABEL: &str = "Mark all as complete";

/// One modelled todo row
#[derive(Debug, Clone)]
struct Row {
    id: String,
    title: String,
    completed: bool,
    /// Edit buffer; `Some` while the row is in Editing state
    editing: Option<String>,
}

#[derive(Debug, Default)]
struct Model {
    url: String,
    rows: Vec<Row>,
    filter: Filter,
    new_todo: String,
    storage: std::collections::HashMap<String, String>,
    history: Vec<String>,
}

/// Semantic page regions a selector can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    NewTodoInput,
    ToggleAll,
    ListRoot,
    /// Index into the currently visible (filtered) rows
    Item(usize),
    ItemCheckbox(usize),
    ItemTitle(usize),
    ItemEdit(usize),
    ItemDelete(usize),
    FilterBar,
    FilterLink(Filter),
    Counter,
    ClearCompleted,
}

/// In-memory TodoMVC page implementing the driver boundary
pub struct SimulatedTodoApp {
    model: Mutex<Model>,
}

impl std::fmt::Debug for SimulatedTodoApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedTodoApp").finish_non_exhaustive()
    }
}

impl Default for SimulatedTodoApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTodoApp {
    /// Create an empty simulated app
    #[must_use]
    pub fn new() -> Self {
        let app = Self {
            model: Mutex::new(Model::default()),
        };
        app.persist();
        app
    }

    /// Create a simulated app pre-seeded with `(title, completed)` rows
    #[must_use]
    pub fn with_todos(todos: &[(&str, bool)]) -> Self {
        let app = Self::new();
        {
            let mut model = app.lock();
            for (title, completed) in todos {
                model.rows.push(Row {
                    id: Uuid::new_v4().to_string(),
                    title: (*title).to_string(),
                    completed: *completed,
                    editing: None,
                });
            }
        }
        app.persist();
        app
    }

    /// Driver calls recorded so far, most recent last
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Check if a driver method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.lock().history.iter().any(|c| c.starts_with(method))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Model> {
        self.model.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record(&self, call: impl Into<String>) {
        self.lock().history.push(call.into());
    }

    /// Mirror the current rows into the persisted store
    fn persist(&self) {
        let mut model = self.lock();
        let records: Vec<TodoRecord> = model
            .rows
            .iter()
            .map(|r| TodoRecord {
                id: r.id.clone(),
                title: r.title.clone(),
                completed: r.completed,
            })
            .collect();
        let json = serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string());
        model.storage.insert(STORAGE_KEY.to_string(), json);
    }

    /// Rebuild the rendered rows from the persisted store
    fn render_from_storage(model: &mut Model) {
        let json = model
            .storage
            .get(STORAGE_KEY)
            .cloned()
            .unwrap_or_else(|| "[]".to_string());
        let records: Vec<TodoRecord> = serde_json::from_str(&json).unwrap_or_default();
        model.rows = records
            .into_iter()
            .map(|r| Row {
                id: r.id,
                title: r.title,
                completed: r.completed,
                editing: None,
            })
            .collect();
    }

    /// Model indices of the rows the active filter renders
    fn visible_rows(model: &Model) -> Vec<usize> {
        model
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| match model.filter {
                Filter::All => true,
                Filter::Active => !r.completed,
                Filter::Completed => r.completed,
            })
            .map(|(i, _)| i)
            .collect()
    }

    fn row_index(model: &Model, visible: usize) -> Option<usize> {
        Self::visible_rows(model).get(visible).copied()
    }

    fn resolve(model: &Model, selector: &Selector) -> Vec<Target> {
        match selector {
            Selector::Css(s) => match s.as_str() {
                ".todo-list" => vec![Target::ListRoot],
                ".filters" => vec![Target::FilterBar],
                ".new-todo" => vec![Target::NewTodoInput],
                ".toggle-all" => vec![Target::ToggleAll],
                ".clear-completed" => vec![Target::ClearCompleted],
                ".todo-count" => vec![Target::Counter],
                _ => vec![],
            },
            Selector::TestId(id) => match id.as_str() {
                "todo-item" => (0..Self::visible_rows(model).len()).map(Target::Item).collect(),
                "todo-title" => (0..Self::visible_rows(model).len())
                    .map(Target::ItemTitle)
                    .collect(),
                "todo-count" => vec![Target::Counter],
                _ => vec![],
            },
            Selector::Placeholder(p) if p == NEW_TODO_PLACEHOLDER => vec![Target::NewTodoInput],
            Selector::Placeholder(_) => vec![],
            Selector::Label(l) if l == TOGGLE_ALL_LABEL => vec![Target::ToggleAll],
            Selector::Label(_) => vec![],
            Selector::Text(t) => {
                let mut out: Vec<Target> = Self::visible_rows(model)
                    .iter()
                    .enumerate()
                    .filter(|(_, &mi)| model.rows[mi].title.contains(t.as_str()))
                    .map(|(vi, _)| Target::Item(vi))
                    .collect();
                if Self::counter_text(model).contains(t.as_str()) {
                    out.push(Target::Counter);
                }
                out
            }
            Selector::Role { role, name } => Self::resolve_role(model, *role, name.as_deref()),
            Selector::Within { parent, child } => Self::resolve(model, parent)
                .into_iter()
                .flat_map(|p| Self::resolve_in(model, p, child))
                .collect(),
            Selector::Nth { base, index } => Self::resolve(model, base)
                .get(*index)
                .copied()
                .into_iter()
                .collect(),
        }
    }

    fn resolve_role(model: &Model, role: Role, name: Option<&str>) -> Vec<Target> {
        let visible = Self::visible_rows(model).len();
        match role {
            Role::Link => Self::filter_links(name),
            Role::Button => match name {
                Some("Clear completed") => vec![Target::ClearCompleted],
                Some("Delete") => (0..visible).map(Target::ItemDelete).collect(),
                Some(_) => vec![],
                None => {
                    let mut out: Vec<Target> = (0..visible).map(Target::ItemDelete).collect();
                    out.push(Target::ClearCompleted);
                    out
                }
            },
            Role::Checkbox => {
                let mut out = vec![Target::ToggleAll];
                out.extend((0..visible).map(Target::ItemCheckbox));
                out
            }
            Role::Textbox => match name {
                Some("Edit") => (0..visible).map(Target::ItemEdit).collect(),
                Some(_) => vec![],
                None => {
                    let mut out = vec![Target::NewTodoInput];
                    out.extend((0..visible).map(Target::ItemEdit));
                    out
                }
            },
        }
    }

    fn filter_links(name: Option<&str>) -> Vec<Target> {
        match name {
            Some("All") => vec![Target::FilterLink(Filter::All)],
            Some("Active") => vec![Target::FilterLink(Filter::Active)],
            Some("Completed") => vec![Target::FilterLink(Filter::Completed)],
            Some(_) => vec![],
            None => vec![
                Target::FilterLink(Filter::All),
                Target::FilterLink(Filter::Active),
                Target::FilterLink(Filter::Completed),
            ],
        }
    }

    fn resolve_in(model: &Model, parent: Target, child: &Selector) -> Vec<Target> {
        match parent {
            Target::ListRoot => match child {
                Selector::TestId(id) if id == "todo-item" => {
                    (0..Self::visible_rows(model).len()).map(Target::Item).collect()
                }
                Selector::Role {
                    role: Role::Checkbox,
                    ..
                } => (0..Self::visible_rows(model).len())
                    .map(Target::ItemCheckbox)
                    .collect(),
                _ => vec![],
            },
            Target::FilterBar => match child {
                Selector::Role {
                    role: Role::Link,
                    name,
                } => Self::filter_links(name.as_deref()),
                _ => vec![],
            },
            Target::Item(i) => Self::resolve_in_item(model, i, child),
            _ => vec![],
        }
    }

    fn resolve_in_item(model: &Model, item: usize, child: &Selector) -> Vec<Target> {
        match child {
            Selector::Role {
                role: Role::Checkbox,
                ..
            } => vec![Target::ItemCheckbox(item)],
            Selector::TestId(id) if id == "todo-title" => vec![Target::ItemTitle(item)],
            Selector::Role {
                role: Role::Textbox,
                name,
            } if name.as_deref() == Some("Edit") || name.is_none() => {
                vec![Target::ItemEdit(item)]
            }
            Selector::Role {
                role: Role::Button,
                name,
            } if name.as_deref() == Some("Delete") || name.is_none() => {
                vec![Target::ItemDelete(item)]
            }
            Selector::Text(t) => {
                let title = Self::row_index(model, item)
                    .map(|mi| model.rows[mi].title.clone())
                    .unwrap_or_default();
                if title.contains(t.as_str()) {
                    vec![Target::ItemTitle(item)]
                } else {
                    vec![]
                }
            }
            _ => vec![],
        }
    }

    fn first(model: &Model, selector: &Selector) -> TareaResult<Target> {
        Self::resolve(model, selector)
            .first()
            .copied()
            .ok_or_else(|| TareaError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    fn counter_text(model: &Model) -> String {
        let active = model.rows.iter().filter(|r| !r.completed).count();
        if active == 1 {
            "1 item left".to_string()
        } else {
            format!("{active} items left")
        }
    }

    fn target_visible(model: &Model, target: Target) -> bool {
        let editing = |i: usize| {
            Self::row_index(model, i).is_some_and(|mi| model.rows[mi].editing.is_some())
        };
        match target {
            Target::NewTodoInput => true,
            Target::ToggleAll
            | Target::ListRoot
            | Target::FilterBar
            | Target::FilterLink(_)
            | Target::Counter => !model.rows.is_empty(),
            Target::Item(i) => Self::row_index(model, i).is_some(),
            Target::ItemCheckbox(i) | Target::ItemTitle(i) | Target::ItemDelete(i) => {
                Self::row_index(model, i).is_some() && !editing(i)
            }
            Target::ItemEdit(i) => editing(i),
            Target::ClearCompleted => model.rows.iter().any(|r| r.completed),
        }
    }

    fn target_text(model: &Model, target: Target) -> String {
        match target {
            Target::Item(i) | Target::ItemTitle(i) => Self::row_index(model, i)
                .map(|mi| model.rows[mi].title.clone())
                .unwrap_or_default(),
            Target::Counter => Self::counter_text(model),
            Target::FilterLink(f) => f.to_string(),
            _ => String::new(),
        }
    }

    fn target_attribute(model: &Model, target: Target, name: &str) -> Option<String> {
        match (target, name) {
            (Target::Item(i), "class") => {
                let mi = Self::row_index(model, i)?;
                let row = &model.rows[mi];
                let mut classes = Vec::new();
                if row.completed {
                    classes.push("completed");
                }
                if row.editing.is_some() {
                    classes.push("editing");
                }
                if classes.is_empty() {
                    None
                } else {
                    Some(classes.join(" "))
                }
            }
            (Target::FilterLink(f), "class") => (model.filter == f).then(|| "selected".to_string()),
            (Target::FilterLink(f), "href") => Some(
                match f {
                    Filter::All => "#/",
                    Filter::Active => "#/active",
                    Filter::Completed => "#/completed",
                }
                .to_string(),
            ),
            (Target::NewTodoInput, "placeholder") => Some(NEW_TODO_PLACEHOLDER.to_string()),
            (Target::NewTodoInput, "class") => Some("new-todo".to_string()),
            (Target::Counter, "class") => Some("todo-count".to_string()),
            (Target::ClearCompleted, "class") => Some("clear-completed".to_string()),
            (Target::ItemTitle(_), "data-testid") => Some("todo-title".to_string()),
            _ => None,
        }
    }

    /// Commit the edit buffer of a row: trimmed-empty destroys the row
    fn commit_edit(model: &mut Model, mi: usize) {
        if let Some(buffer) = model.rows[mi].editing.take() {
            let trimmed = buffer.trim();
            if trimmed.is_empty() {
                debug!(index = mi, "edit committed empty, destroying row");
                model.rows.remove(mi);
            } else {
                model.rows[mi].title = trimmed.to_string();
            }
        }
    }

    fn set_filter_from_url(model: &mut Model) {
        model.filter = if model.url.ends_with("#/active") {
            Filter::Active
        } else if model.url.ends_with("#/completed") {
            Filter::Completed
        } else {
            Filter::All
        };
    }
}

#[async_trait]
impl Driver for SimulatedTodoApp {
    async fn goto(&self, url: &str) -> TareaResult<()> {
        self.record(format!("goto:{url}"));
        let mut model = self.lock();
        model.url = url.to_string();
        Self::set_filter_from_url(&mut model);
        Self::render_from_storage(&mut model);
        Ok(())
    }

    async fn reload(&self) -> TareaResult<()> {
        self.record("reload");
        let mut model = self.lock();
        Self::render_from_storage(&mut model);
        Ok(())
    }

    async fn go_back(&self) -> TareaResult<()> {
        self.record("go_back");
        Ok(())
    }

    async fn current_url(&self) -> TareaResult<String> {
        Ok(self.lock().url.clone())
    }

    async fn title(&self) -> TareaResult<String> {
        Ok("React • TodoMVC".to_string())
    }

    async fn count(&self, selector: &Selector) -> TareaResult<usize> {
        let model = self.lock();
        Ok(Self::resolve(&model, selector).len())
    }

    async fn is_visible(&self, selector: &Selector) -> TareaResult<bool> {
        let model = self.lock();
        Ok(Self::resolve(&model, selector)
            .first()
            .is_some_and(|&t| Self::target_visible(&model, t)))
    }

    async fn text_content(&self, selector: &Selector) -> TareaResult<Option<String>> {
        let model = self.lock();
        Ok(Self::resolve(&model, selector)
            .first()
            .map(|&t| Self::target_text(&model, t)))
    }

    async fn attribute(&self, selector: &Selector, name: &str) -> TareaResult<Option<String>> {
        let model = self.lock();
        let target = Self::first(&model, selector)?;
        Ok(Self::target_attribute(&model, target, name))
    }

    async fn input_value(&self, selector: &Selector) -> TareaResult<String> {
        let model = self.lock();
        let target = Self::first(&model, selector)?;
        match target {
            Target::NewTodoInput => Ok(model.new_todo.clone()),
            Target::ItemEdit(i) => Self::row_index(&model, i)
                .and_then(|mi| model.rows[mi].editing.clone())
                .ok_or_else(|| TareaError::InvalidState {
                    message: "edit field read while row is not editing".to_string(),
                }),
            _ => Err(TareaError::InvalidState {
                message: format!("{selector} is not an input"),
            }),
        }
    }

    async fn is_checked(&self, selector: &Selector) -> TareaResult<bool> {
        let model = self.lock();
        let target = Self::first(&model, selector)?;
        match target {
            Target::ToggleAll => {
                Ok(!model.rows.is_empty() && model.rows.iter().all(|r| r.completed))
            }
            Target::ItemCheckbox(i) => Ok(Self::row_index(&model, i)
                .is_some_and(|mi| model.rows[mi].completed)),
            _ => Err(TareaError::InvalidState {
                message: format!("{selector} is not a checkbox"),
            }),
        }
    }

    async fn is_enabled(&self, selector: &Selector) -> TareaResult<bool> {
        let model = self.lock();
        Self::first(&model, selector)?;
        Ok(true)
    }

    async fn click(&self, selector: &Selector) -> TareaResult<()> {
        self.record(format!("click:{selector}"));
        {
            let mut model = self.lock();
            let target = Self::first(&model, selector)?;
            match target {
                Target::ItemCheckbox(i) => {
                    if let Some(mi) = Self::row_index(&model, i) {
                        model.rows[mi].completed = !model.rows[mi].completed;
                    }
                }
                Target::ToggleAll => {
                    let all_done = model.rows.iter().all(|r| r.completed);
                    for row in &mut model.rows {
                        row.completed = !all_done;
                    }
                }
                Target::FilterLink(f) => model.filter = f,
                Target::ClearCompleted => model.rows.retain(|r| !r.completed),
                Target::ItemDelete(i) => {
                    if let Some(mi) = Self::row_index(&model, i) {
                        model.rows.remove(mi);
                    }
                }
                _ => {}
            }
        }
        self.persist();
        Ok(())
    }

    async fn double_click(&self, selector: &Selector) -> TareaResult<()> {
        self.record(format!("double_click:{selector}"));
        let mut model = self.lock();
        let target = Self::first(&model, selector)?;
        if let Target::Item(i) | Target::ItemTitle(i) = target {
            if let Some(mi) = Self::row_index(&model, i) {
                let buffer = model.rows[mi].title.clone();
                model.rows[mi].editing = Some(buffer);
            }
        }
        Ok(())
    }

    async fn hover(&self, selector: &Selector) -> TareaResult<()> {
        self.record(format!("hover:{selector}"));
        let model = self.lock();
        Self::first(&model, selector)?;
        Ok(())
    }

    async fn fill(&self, selector: &Selector, text: &str) -> TareaResult<()> {
        self.record(format!("fill:{selector}"));
        let mut model = self.lock();
        let target = Self::first(&model, selector)?;
        match target {
            Target::NewTodoInput => {
                model.new_todo = text.to_string();
                Ok(())
            }
            Target::ItemEdit(i) => {
                let mi = Self::row_index(&model, i).ok_or_else(|| TareaError::ElementNotFound {
                    selector: selector.to_string(),
                })?;
                if model.rows[mi].editing.is_none() {
                    return Err(TareaError::ElementNotFound {
                        selector: selector.to_string(),
                    });
                }
                model.rows[mi].editing = Some(text.to_string());
                Ok(())
            }
            _ => Err(TareaError::InvalidState {
                message: format!("{selector} is not fillable"),
            }),
        }
    }

    async fn press(&self, selector: &Selector, key: &str) -> TareaResult<()> {
        self.record(format!("press:{key}:{selector}"));
        {
            let mut model = self.lock();
            let target = Self::first(&model, selector)?;
            match (target, key) {
                (Target::NewTodoInput, "Enter") => {
                    let trimmed = model.new_todo.trim().to_string();
                    if !trimmed.is_empty() {
                        model.rows.push(Row {
                            id: Uuid::new_v4().to_string(),
                            title: trimmed,
                            completed: false,
                            editing: None,
                        });
                    }
                    model.new_todo.clear();
                }
                (Target::ItemEdit(i), "Enter") => {
                    if let Some(mi) = Self::row_index(&model, i) {
                        Self::commit_edit(&mut model, mi);
                    }
                }
                (Target::ItemEdit(i), "Escape") => {
                    if let Some(mi) = Self::row_index(&model, i) {
                        model.rows[mi].editing = None;
                    }
                }
                _ => {}
            }
        }
        self.persist();
        Ok(())
    }

    async fn set_checked(&self, selector: &Selector, checked: bool) -> TareaResult<()> {
        self.record(format!("set_checked:{checked}:{selector}"));
        {
            let mut model = self.lock();
            let target = Self::first(&model, selector)?;
            match target {
                Target::ItemCheckbox(i) => {
                    if let Some(mi) = Self::row_index(&model, i) {
                        model.rows[mi].completed = checked;
                    }
                }
                Target::ToggleAll => {
                    for row in &mut model.rows {
                        row.completed = checked;
                    }
                }
                _ => {
                    return Err(TareaError::InvalidState {
                        message: format!("{selector} is not a checkbox"),
                    })
                }
            }
        }
        self.persist();
        Ok(())
    }

    async fn focus(&self, selector: &Selector) -> TareaResult<()> {
        self.record(format!("focus:{selector}"));
        let model = self.lock();
        Self::first(&model, selector)?;
        Ok(())
    }

    async fn blur(&self, selector: &Selector) -> TareaResult<()> {
        self.record(format!("blur:{selector}"));
        {
            let mut model = self.lock();
            let target = Self::first(&model, selector)?;
            // blur-to-save on the edit field
            if let Target::ItemEdit(i) = target {
                if let Some(mi) = Self::row_index(&model, i) {
                    Self::commit_edit(&mut model, mi);
                }
            }
        }
        self.persist();
        Ok(())
    }

    async fn wait_for_state(
        &self,
        selector: &Selector,
        state: ElementState,
        options: &WaitOptions,
    ) -> TareaResult<()> {
        let start = Instant::now();
        loop {
            let matched = {
                let model = self.lock();
                let visible = Self::resolve(&model, selector)
                    .first()
                    .is_some_and(|&t| Self::target_visible(&model, t));
                match state {
                    ElementState::Visible => visible,
                    ElementState::Hidden => !visible,
                }
            };
            if matched {
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

    async fn evaluate(&self, script: &str) -> TareaResult<serde_json::Value> {
        self.record(format!("evaluate:{script}"));
        Err(TareaError::EvalError {
            message: "script evaluation is not modelled by the simulated app".to_string(),
        })
    }

    async fn storage_get(&self, key: &str) -> TareaResult<Option<String>> {
        Ok(self.lock().storage.get(key).cloned())
    }

    async fn storage_set(&self, key: &str, value: &str) -> TareaResult<()> {
        self.lock()
            .storage
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn storage_remove(&self, key: &str) -> TareaResult<()> {
        self.lock().storage.remove(key);
        Ok(())
    }
}
