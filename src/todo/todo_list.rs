use serde::Serialize;

use super::classify::{is_list_completed, todos_remaining};

/// A single actionable item belonging to one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Todo {
    /// Generated identifier
    pub id: i64,
    /// Display name (1-100 characters)
    pub name: String,
    /// Whether the todo has been done
    pub completed: bool,
    /// Owning list
    pub list_id: i64,
}

/// A named collection of todos
///
/// `todos` is kept in insertion order as loaded from storage. Display order is
/// produced by [`sort_items`](super::sort_items), never by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    /// Generated identifier
    pub id: i64,
    /// Display name, unique across all lists (1-100 characters)
    pub name: String,
    /// Todos owned by this list
    pub todos: Vec<Todo>,
}

impl List {
    /// Create a list with no todos
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Attach todos to the list, replacing any already present
    pub fn with_todos(mut self, todos: Vec<Todo>) -> Self {
        self.todos = todos;
        self
    }

    /// Build the summary shown on the index page
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id,
            name: self.name.clone(),
            completed: is_list_completed(self),
            remaining: todos_remaining(self),
            total: self.todos.len(),
        }
    }
}

/// Per-list counters rendered on the index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub id: i64,
    pub name: String,
    pub completed: bool,
    pub remaining: usize,
    pub total: usize,
}
