//! Shared fixtures for board unit tests.

use crate::board::domain::{
    CategoryId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, UserId,
};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock pinned to a settable instant.
pub(super) struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub(super) const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

/// Returns 2025-06-`day` at `hour`:00 UTC.
pub(super) fn june(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Reference "now" shared by view and analytics tests.
pub(super) fn now() -> DateTime<Utc> {
    june(15, 12)
}

/// Builds persisted tasks with explicit timestamps.
pub(super) struct TaskBuilder {
    data: PersistedTaskData,
}

pub(super) fn task(id: &str, title: &str) -> TaskBuilder {
    TaskBuilder {
        data: PersistedTaskData {
            id: TaskId::parse(id).expect("valid task id"),
            title: title.to_owned(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            assigned_client_id: None,
            created_by: None,
            category_id: None,
            created_at: june(1, 9),
            due_date: None,
            completed_at: None,
        },
    }
}

impl TaskBuilder {
    pub(super) fn description(mut self, description: &str) -> Self {
        self.data.description = description.to_owned();
        self
    }

    pub(super) fn created(mut self, created_at: DateTime<Utc>) -> Self {
        self.data.created_at = created_at;
        self
    }

    pub(super) fn due(mut self, due_date: DateTime<Utc>) -> Self {
        self.data.due_date = Some(due_date);
        self
    }

    pub(super) fn priority(mut self, priority: TaskPriority) -> Self {
        self.data.priority = priority;
        self
    }

    pub(super) fn assigned(mut self, client: &UserId) -> Self {
        self.data.assigned_client_id = Some(client.clone());
        self
    }

    pub(super) fn category(mut self, category: &CategoryId) -> Self {
        self.data.category_id = Some(category.clone());
        self
    }

    pub(super) fn status(mut self, status: TaskStatus) -> Self {
        self.data.status = status;
        self.data.completed_at = (status == TaskStatus::Completed)
            .then(|| self.data.created_at + Duration::hours(12));
        self
    }

    pub(super) fn completed_at(mut self, completed_at: DateTime<Utc>) -> Self {
        self.data.status = TaskStatus::Completed;
        self.data.completed_at = Some(completed_at);
        self
    }

    pub(super) fn build(self) -> Task {
        Task::from_persisted(self.data).expect("valid persisted task")
    }
}

pub(super) fn user_id(raw: &str) -> UserId {
    UserId::parse(raw).expect("valid user id")
}

pub(super) fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id().as_str()).collect()
}
