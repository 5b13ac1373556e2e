//! Summary counts over a scoped task set.

use crate::board::domain::{Task, TaskStatus, rounded_percentage};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary statistics shown alongside a derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCounts {
    /// Number of tasks in scope.
    pub total: usize,
    /// Tasks with status pending.
    pub pending: usize,
    /// Tasks with status in progress.
    pub in_progress: usize,
    /// Tasks with status completed.
    pub completed: usize,
    /// Open tasks whose due date has passed.
    pub overdue: usize,
    /// Tasks without an assignee; only reported for the administrator scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned: Option<usize>,
    /// Completed share of `total` as a rounded percentage.
    pub completion_rate: u8,
}

impl TaskCounts {
    /// Tallies `tasks` as of `now`.
    ///
    /// `include_unassigned` controls whether the unassigned count is
    /// reported.
    #[must_use]
    pub fn tally<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        now: DateTime<Utc>,
        include_unassigned: bool,
    ) -> Self {
        let mut counts = Self::default();
        let mut unassigned = 0;
        for task in tasks {
            counts.total += 1;
            match task.status() {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
            if is_overdue(task, now) {
                counts.overdue += 1;
            }
            if task.assigned_client_id().is_none() {
                unassigned += 1;
            }
        }
        counts.unassigned = include_unassigned.then_some(unassigned);
        counts.completion_rate = completion_rate(counts.completed, counts.total);
        counts
    }
}

/// Percentage of `total` that is `completed`, rounded to the nearest
/// integer; `0` when `total` is zero.
#[must_use]
pub fn completion_rate(completed: usize, total: usize) -> u8 {
    rounded_percentage(completed, total)
}

/// Whether `task` is past its due date and still open at `now`.
///
/// Completed tasks and tasks without a due date are never overdue.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.is_overdue(now)
}
