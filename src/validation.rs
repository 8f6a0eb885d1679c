//! Validation helper functions for list and todo names
//!
//! Names are checked after trimming surrounding whitespace. Length is counted
//! in characters, not bytes.

use crate::todo::List;
use thiserror::Error;

/// Minimum number of characters in a list or todo name
pub const MIN_NAME_LENGTH: usize = 1;

/// Maximum number of characters in a list or todo name
pub const MAX_NAME_LENGTH: usize = 100;

/// What kind of record a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    List,
    Todo,
}

/// A rejected name
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The list name must be unique.")]
    DuplicateName,
    #[error("{}", invalid_length_message(.0))]
    InvalidLength(NameKind),
}

fn invalid_length_message(kind: &NameKind) -> &'static str {
    match kind {
        NameKind::List => "The list name must be between 1 and 100 characters",
        NameKind::Todo => "Todo name must be between 1 and 100 characters",
    }
}

fn has_valid_length(name: &str) -> bool {
    let length = name.trim().chars().count();
    (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length)
}

/// Validate a list name against the lists that already exist
///
/// # Arguments
/// * `name` - Proposed list name
/// * `existing_lists` - Lists the name must not collide with (exact, case-sensitive match)
///
/// # Returns
/// `Err(DuplicateName)` if the name is taken, `Err(InvalidLength)` if the
/// trimmed name is empty or longer than 100 characters, `Ok(())` otherwise
pub fn validate_list_name<'a, I>(name: &str, existing_lists: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a List>,
{
    if existing_lists.into_iter().any(|list| list.name == name) {
        return Err(ValidationError::DuplicateName);
    }
    if !has_valid_length(name) {
        return Err(ValidationError::InvalidLength(NameKind::List));
    }
    Ok(())
}

/// Validate a todo name
///
/// # Returns
/// `Err(InvalidLength)` if the trimmed name is empty or longer than 100 characters
pub fn validate_todo_name(name: &str) -> Result<(), ValidationError> {
    if !has_valid_length(name) {
        return Err(ValidationError::InvalidLength(NameKind::Todo));
    }
    Ok(())
}
