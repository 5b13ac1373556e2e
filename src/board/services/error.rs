//! Service-level errors for board operations.

use crate::board::{
    domain::{BoardDomainError, CategoryId, SubtaskId, TaskId, UserId},
    ports::StoreError,
    records::RecordError,
};
use thiserror::Error;

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors returned by [`super::TaskBoardService`].
///
/// Validation, scope, and lookup failures are raised before any state
/// changes. [`BoardError::Persistence`] and [`BoardError::Encode`] are raised
/// after the in-memory change has been applied: the session keeps the new
/// state, but the durable copy is stale until the next successful write.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Input failed domain validation.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// A client tried to read or change a task not assigned to them.
    #[error("task {task} is outside the scope of viewer {viewer}")]
    ScopeViolation {
        /// Acting viewer.
        viewer: UserId,
        /// Task outside the viewer's scope.
        task: TaskId,
    },

    /// A client tried to perform an administrator-only action.
    #[error("viewer {viewer} must be an administrator to {action}")]
    AdminRequired {
        /// Acting viewer.
        viewer: UserId,
        /// Attempted action.
        action: &'static str,
    },

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The category does not exist.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The subtask does not exist.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// Another user already uses the email address.
    #[error("email address already registered: {0}")]
    DuplicateEmail(String),

    /// Tasks can only be assigned to existing client users.
    #[error("user {0} cannot be assigned tasks")]
    InvalidAssignee(UserId),

    /// The change is applied in memory but was not written to the store.
    #[error("changes applied but not persisted: {0}")]
    Persistence(#[from] StoreError),

    /// The change is applied in memory but could not be encoded for storage.
    #[error("changes applied but not encoded: {0}")]
    Encode(#[from] RecordError),
}

impl BoardError {
    /// Returns `true` for authorization failures of either kind.
    #[must_use]
    pub const fn is_scope_violation(&self) -> bool {
        matches!(self, Self::ScopeViolation { .. } | Self::AdminRequired { .. })
    }

    /// Returns `true` when in-memory state changed but was not persisted.
    #[must_use]
    pub const fn is_unpersisted_change(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::Encode(_))
    }
}
