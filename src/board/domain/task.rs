//! Task record and its status lifecycle.

use super::{BoardDomainError, CategoryId, ParseEnumError, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Pending,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseEnumError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError::new("task status", value)),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl TaskPriority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseEnumError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseEnumError::new("task priority", value)),
        }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assigned_client_id: Option<UserId>,
    category_id: Option<CategoryId>,
}

impl NewTask {
    /// Creates task input with the required title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the title is empty
    /// after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, BoardDomainError> {
        Ok(Self {
            title: normalize_title(title.into())?,
            description: String::new(),
            priority: TaskPriority::default(),
            due_date: None,
            assigned_client_id: None,
            category_id: None,
        })
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Assigns the task to a client on creation.
    #[must_use]
    pub fn with_assignee(mut self, client_id: UserId) -> Self {
        self.assigned_client_id = Some(client_id);
        self
    }

    /// Files the task under a category on creation.
    #[must_use]
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Returns the requested assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&UserId> {
        self.assigned_client_id.as_ref()
    }

    /// Returns the requested category, if any.
    #[must_use]
    pub const fn category(&self) -> Option<&CategoryId> {
        self.category_id.as_ref()
    }
}

/// Partial edit of a task. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<Option<DateTime<Utc>>>,
    category_id: Option<Option<CategoryId>>,
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces or clears the category.
    #[must_use]
    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the category change requested by this patch.
    ///
    /// `None` means the category is untouched; `Some(None)` clears it.
    #[must_use]
    pub const fn category_change(&self) -> Option<&Option<CategoryId>> {
        self.category_id.as_ref()
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.category_id.is_none()
            && self.status.is_none()
    }
}

/// A unit of work tracked by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    assigned_client_id: Option<UserId>,
    created_by: Option<UserId>,
    category_id: Option<CategoryId>,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted assignee, if any.
    pub assigned_client_id: Option<UserId>,
    /// Persisted creator, if known.
    pub created_by: Option<UserId>,
    /// Persisted category, if any.
    pub category_id: Option<CategoryId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a pending task from validated input.
    #[must_use]
    pub fn create(new_task: NewTask, created_by: Option<UserId>, clock: &impl Clock) -> Self {
        let NewTask {
            title,
            description,
            priority,
            due_date,
            assigned_client_id,
            category_id,
        } = new_task;

        Self {
            id: TaskId::new(),
            title,
            description,
            status: TaskStatus::Pending,
            priority,
            assigned_client_id,
            created_by,
            category_id,
            created_at: clock.utc(),
            due_date,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] for a blank title and
    /// [`BoardDomainError::CompletionMismatch`] when `completed_at` is set
    /// without a completed status or missing on a completed task.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, BoardDomainError> {
        let title = normalize_title(data.title)?;
        let is_completed = data.status == TaskStatus::Completed;
        if is_completed != data.completed_at.is_some() {
            return Err(BoardDomainError::CompletionMismatch {
                kind: "task",
                id: data.id.to_string(),
            });
        }

        Ok(Self {
            id: data.id,
            title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            assigned_client_id: data.assigned_client_id,
            created_by: data.created_by,
            category_id: data.category_id,
            created_at: data.created_at,
            due_date: data.due_date,
            completed_at: data.completed_at,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the assigned client, if any.
    #[must_use]
    pub const fn assigned_client_id(&self) -> Option<&UserId> {
        self.assigned_client_id.as_ref()
    }

    /// Returns the creating user, if known.
    #[must_use]
    pub const fn created_by(&self) -> Option<&UserId> {
        self.created_by.as_ref()
    }

    /// Returns the category, if any.
    #[must_use]
    pub const fn category_id(&self) -> Option<&CategoryId> {
        self.category_id.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the completion timestamp, set exactly when completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` when the task is assigned to `client_id`.
    #[must_use]
    pub fn is_assigned_to(&self, client_id: &UserId) -> bool {
        self.assigned_client_id.as_ref() == Some(client_id)
    }

    /// Returns `true` when the due date has passed and the task is not
    /// completed. Tasks without a due date are never overdue.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Returns `true` when the lowercased title or description contains
    /// `needle`, which must already be lowercased.
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Moves the task to `status`, maintaining the completion timestamp.
    ///
    /// Returns `true` when the status changed.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) -> bool {
        if self.status == status {
            return false;
        }
        self.completed_at = match status {
            TaskStatus::Completed => Some(clock.utc()),
            TaskStatus::Pending | TaskStatus::InProgress => None,
        };
        self.status = status;
        true
    }

    /// Flips between completed and pending; any open status completes.
    ///
    /// Returns the new status.
    pub fn toggle_completion(&mut self, clock: &impl Clock) -> TaskStatus {
        let next = match self.status {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        };
        self.set_status(next, clock);
        next
    }

    /// Sets or clears the assigned client.
    pub fn assign(&mut self, client_id: Option<UserId>) {
        self.assigned_client_id = client_id;
    }

    /// Clears the category when it matches `category_id`.
    pub fn detach_category(&mut self, category_id: &CategoryId) {
        if self.category_id.as_ref() == Some(category_id) {
            self.category_id = None;
        }
    }

    /// Applies a partial edit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] when the patch carries a
    /// blank title; the task is left untouched in that case.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) -> Result<(), BoardDomainError> {
        let TaskPatch {
            title,
            description,
            priority,
            due_date,
            category_id,
            status,
        } = patch;
        let validated_title = title.map(normalize_title).transpose()?;

        if let Some(new_title) = validated_title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }
        if let Some(new_category) = category_id {
            self.category_id = new_category;
        }
        if let Some(new_status) = status {
            self.set_status(new_status, clock);
        }
        Ok(())
    }
}

fn normalize_title(title: String) -> Result<String, BoardDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyTaskTitle);
    }
    Ok(trimmed.to_owned())
}
