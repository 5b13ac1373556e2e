//! Request payloads accepted by the board service.

use crate::board::domain::{BoardDomainError, CategoryId, NewTask, TaskPriority, UserId};
use chrono::{DateTime, Utc};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    assignee: Option<UserId>,
    category: Option<CategoryId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: TaskPriority::default(),
            due_date: None,
            assignee: None,
            category: None,
        }
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

    /// Assigns the new task to a client.
    #[must_use]
    pub fn with_assignee(mut self, client_id: UserId) -> Self {
        self.assignee = Some(client_id);
        self
    }

    /// Files the new task under a category.
    #[must_use]
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category = Some(category_id);
        self
    }

    /// Validates the request into domain input.
    pub(crate) fn into_new_task(self) -> Result<NewTask, BoardDomainError> {
        let mut new_task = NewTask::new(self.title)?
            .with_description(self.description)
            .with_priority(self.priority);
        if let Some(due_date) = self.due_date {
            new_task = new_task.with_due_date(due_date);
        }
        if let Some(assignee) = self.assignee {
            new_task = new_task.with_assignee(assignee);
        }
        if let Some(category) = self.category {
            new_task = new_task.with_category(category);
        }
        Ok(new_task)
    }
}
