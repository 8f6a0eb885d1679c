//! Display ordering and completion counters
//!
//! Lists and todos are shown with every incomplete item ahead of every
//! complete one, each group ordered by name ignoring case.

use super::todo_list::{List, Todo};

/// Anything that can be ordered by a display name
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for List {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Todo {
    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Sort items by name (case-insensitive), then move complete items after incomplete ones
///
/// The whole collection is sorted first and then split in two, so each group
/// keeps the name order. Both steps are stable, which makes the function
/// idempotent: sorting an already sorted sequence returns it unchanged.
///
/// # Arguments
/// * `items` - Items to order
/// * `is_completed` - Predicate deciding which group an item belongs to
///
/// # Returns
/// Incomplete items followed by complete items
pub fn sort_items<T, I, F>(items: I, is_completed: F) -> Vec<T>
where
    T: Named,
    I: IntoIterator<Item = T>,
    F: Fn(&T) -> bool,
{
    let mut sorted: Vec<T> = items.into_iter().collect();
    sorted.sort_by_cached_key(|item| item.name().to_lowercase());

    let (mut incomplete, complete): (Vec<T>, Vec<T>) =
        sorted.into_iter().partition(|item| !is_completed(item));
    incomplete.extend(complete);
    incomplete
}

/// Number of todos in the list that are not completed yet
pub fn todos_remaining(list: &List) -> usize {
    list.todos.iter().filter(|todo| !todo.completed).count()
}

/// A list is completed when it has at least one todo and none remain
pub fn is_list_completed(list: &List) -> bool {
    !list.todos.is_empty() && todos_remaining(list) == 0
}

pub fn is_todo_completed(todo: &Todo) -> bool {
    todo.completed
}

/// Find a todo by its ID within a list's todos
pub fn find_todo_by_id(todo_id: i64, todos: &[Todo]) -> Option<&Todo> {
    todos.iter().find(|todo| todo.id == todo_id)
}
