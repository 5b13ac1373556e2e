//! Checklist items attached to a parent task.

use super::{BoardDomainError, SubtaskId, TaskId, rounded_percentage};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A checklist item belonging to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    id: SubtaskId,
    parent_task_id: TaskId,
    title: String,
    completed: bool,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Subtask {
    /// Creates an open subtask under `parent_task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptySubtaskTitle`] when the title is empty
    /// after trimming.
    pub fn create(
        parent_task_id: TaskId,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id: SubtaskId::new(),
            parent_task_id,
            title: normalize_title(title.into())?,
            completed: false,
            created_at: clock.utc(),
            completed_at: None,
        })
    }

    /// Reconstructs a subtask from persisted fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptySubtaskTitle`] for a blank title and
    /// [`BoardDomainError::CompletionMismatch`] when `completed_at` disagrees
    /// with `completed`.
    pub fn from_persisted(
        id: SubtaskId,
        parent_task_id: TaskId,
        title: String,
        completed: bool,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<Self, BoardDomainError> {
        if completed != completed_at.is_some() {
            return Err(BoardDomainError::CompletionMismatch {
                kind: "subtask",
                id: id.to_string(),
            });
        }
        Ok(Self {
            id,
            parent_task_id,
            title: normalize_title(title)?,
            completed,
            created_at,
            completed_at,
        })
    }

    /// Returns the subtask identifier.
    #[must_use]
    pub const fn id(&self) -> &SubtaskId {
        &self.id
    }

    /// Returns the parent task identifier.
    #[must_use]
    pub const fn parent_task_id(&self) -> &TaskId {
        &self.parent_task_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns `true` once the item is checked off.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, set exactly when completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self, clock: &impl Clock) -> bool {
        self.completed = !self.completed;
        self.completed_at = self.completed.then(|| clock.utc());
        self.completed
    }
}

/// Percentage of `subtasks` that are completed, `0` for an empty list.
#[must_use]
pub fn subtask_progress<'a>(subtasks: impl IntoIterator<Item = &'a Subtask>) -> u8 {
    let (done, total) = subtasks
        .into_iter()
        .fold((0_usize, 0_usize), |(done, total), subtask| {
            (done + usize::from(subtask.completed), total + 1)
        });
    rounded_percentage(done, total)
}

fn normalize_title(title: String) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptySubtaskTitle);
    }
    Ok(trimmed.to_owned())
}
