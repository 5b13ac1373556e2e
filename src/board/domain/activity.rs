//! Append-only activity log entries.

use super::{ActivityId, ParseEnumError, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// What happened to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// The task was created.
    Created,
    /// Task fields were edited.
    Updated,
    /// The task moved to a different status.
    StatusChanged,
    /// The assignee was set or cleared.
    Assigned,
    /// The task was deleted.
    Deleted,
    /// A subtask was added.
    SubtaskAdded,
    /// A subtask was checked off.
    SubtaskCompleted,
    /// A completed subtask was unchecked.
    SubtaskReopened,
    /// A subtask was removed.
    SubtaskDeleted,
    /// A free-form note was left on the task.
    Commented,
}

impl ActivityKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Assigned => "assigned",
            Self::Deleted => "deleted",
            Self::SubtaskAdded => "subtask_added",
            Self::SubtaskCompleted => "subtask_completed",
            Self::SubtaskReopened => "subtask_reopened",
            Self::SubtaskDeleted => "subtask_deleted",
            Self::Commented => "commented",
        }
    }
}

impl TryFrom<&str> for ActivityKind {
    type Error = ParseEnumError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "status_changed" => Ok(Self::StatusChanged),
            "assigned" => Ok(Self::Assigned),
            "deleted" => Ok(Self::Deleted),
            "subtask_added" => Ok(Self::SubtaskAdded),
            "subtask_completed" => Ok(Self::SubtaskCompleted),
            "subtask_reopened" => Ok(Self::SubtaskReopened),
            "subtask_deleted" => Ok(Self::SubtaskDeleted),
            "commented" => Ok(Self::Commented),
            _ => Err(ParseEnumError::new("activity kind", value)),
        }
    }
}

/// One entry in the task activity log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    id: ActivityId,
    task_id: TaskId,
    user_id: Option<UserId>,
    kind: ActivityKind,
    message: String,
    created_at: DateTime<Utc>,
}

impl Activity {
    /// Records a new activity at the current clock time.
    #[must_use]
    pub fn record(
        task_id: TaskId,
        user_id: Option<UserId>,
        kind: ActivityKind,
        message: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self::from_persisted(
            ActivityId::new(),
            task_id,
            user_id,
            kind,
            message.into(),
            clock.utc(),
        )
    }

    /// Reconstructs an activity from persisted fields.
    #[must_use]
    pub const fn from_persisted(
        id: ActivityId,
        task_id: TaskId,
        user_id: Option<UserId>,
        kind: ActivityKind,
        message: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            user_id,
            kind,
            message,
            created_at,
        }
    }

    /// Returns the activity identifier.
    #[must_use]
    pub const fn id(&self) -> &ActivityId {
        &self.id
    }

    /// Returns the task the activity concerns.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the acting user, if known.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Returns the kind of change.
    #[must_use]
    pub const fn kind(&self) -> ActivityKind {
        self.kind
    }

    /// Returns the human-readable summary.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns when the activity happened.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
