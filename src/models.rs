use serde::{Deserialize, Serialize};

/// A single todo item: a name and a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub completed: bool,
}

impl Task {
    /// New tasks start not completed.
    pub fn new(name: &str) -> Self {
        Task {
            name: name.to_string(),
            completed: false,
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.completed { "✓" } else { "○" }
    }
}

/// A named, ordered collection of tasks. Insertion order is significant and
/// tasks are addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        TodoList {
            name: name.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
