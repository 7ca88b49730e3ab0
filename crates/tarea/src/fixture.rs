//! Test data generators.
//!
//! The generator carries its own seeded RNG so a failing scenario can be
//! replayed bit-for-bit from the seed in its log line.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::storage::TodoRecord;

/// The three canonical scenario titles
pub const DEFAULT_TODOS: [&str; 3] = [
    "buy some cheese",
    "feed the cat",
    "book a doctors appointment",
];

const ACTIONS: [&str; 10] = [
    "buy", "clean", "feed", "book", "write", "call", "fix", "read", "water", "walk",
];

const OBJECTS: [&str; 10] = [
    "some cheese",
    "the cat",
    "a doctors appointment",
    "the kitchen",
    "the report",
    "the dentist",
    "the leaky tap",
    "chapter four",
    "the plants",
    "the dog",
];

/// Seeded generator for todo titles and records
#[derive(Debug)]
pub struct TodoGenerator {
    seed: u64,
    rng: StdRng,
}

impl TodoGenerator {
    /// Create a generator from an explicit seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this generator was built from
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The fixed default titles
    #[must_use]
    pub fn default_todos() -> Vec<String> {
        DEFAULT_TODOS.iter().map(|s| (*s).to_string()).collect()
    }

    /// One random "action object" title
    pub fn random_title(&mut self) -> String {
        let action = ACTIONS[self.rng.gen_range(0..ACTIONS.len())];
        let object = OBJECTS[self.rng.gen_range(0..OBJECTS.len())];
        format!("{action} {object}")
    }

    /// `count` titles, unique within this call.
    ///
    /// The word pools bound the distinct combinations; past that the titles
    /// get a numeric suffix to stay unique.
    pub fn titles(&mut self, count: usize) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            let mut title = self.random_title();
            if !seen.insert(title.clone()) {
                title = format!("{title} #{}", out.len() + 1);
                if !seen.insert(title.clone()) {
                    continue;
                }
            }
            out.push(title);
        }
        out
    }

    /// One record; a random title when none is given
    pub fn todo(&mut self, title: Option<&str>, completed: bool) -> TodoRecord {
        TodoRecord {
            id: Uuid::new_v4().to_string(),
            title: title.map_or_else(|| self.random_title(), ToString::to_string),
            completed,
        }
    }

    /// `count` records with unique titles; each is completed with
    /// probability `completed_ratio`
    pub fn todos_with_completed(&mut self, count: usize, completed_ratio: f64) -> Vec<TodoRecord> {
        let titles = self.titles(count);
        titles
            .into_iter()
            .map(|title| {
                let completed = self.rng.gen_bool(completed_ratio.clamp(0.0, 1.0));
                TodoRecord {
                    id: Uuid::new_v4().to_string(),
                    title,
                    completed,
                }
            })
            .collect()
    }

    /// Replacement text for an edit scenario
    pub fn edit_text(&mut self) -> String {
        format!("{} (edited)", self.random_title())
    }

    /// Pad a title with leading and trailing spaces the page must trim
    #[must_use]
    pub fn with_surrounding_spaces(text: &str) -> String {
        format!("  {text}  ")
    }

    /// A small random todo count, 1..=10
    pub fn random_count(&mut self) -> usize {
        self.rng.gen_range(1..=10)
    }
}
