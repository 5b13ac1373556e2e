//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or editing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// An identifier was empty after trimming.
    #[error("{0} identifier must not be empty")]
    EmptyIdentifier(&'static str),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The subtask title is empty after trimming.
    #[error("subtask title must not be empty")]
    EmptySubtaskTitle,

    /// The comment text is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,

    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The category name is empty after trimming.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A persisted completion timestamp disagrees with the completion state.
    #[error("{kind} {id} has a completion timestamp that does not match its status")]
    CompletionMismatch {
        /// Record kind (`task` or `subtask`).
        kind: &'static str,
        /// Identifier of the offending record.
        id: String,
    },
}

/// Error returned while parsing an enumerated value from its string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
