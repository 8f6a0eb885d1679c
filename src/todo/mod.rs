//! Todo list domain models and display logic
//!
//! This module contains the core data structures and the pure functions that
//! order them for display. It is split into submodules:
//! - `todo_list`: `List`, `Todo` and the `ListSummary` display record
//! - `classify`: sorting by name with incomplete items first, completion counters

mod classify;
mod todo_list;

// Re-export all public types
pub use classify::{
    Named, find_todo_by_id, is_list_completed, is_todo_completed, sort_items, todos_remaining,
};
pub use todo_list::{List, ListSummary, Todo};
