//! Aggregate statistics over a scoped task set.
//!
//! Every function here is a pure reduction. Callers pass tasks that have
//! already been restricted to the viewer's scope (see
//! [`crate::board::view::scope_tasks`]).

use crate::board::{
    domain::{Category, CategoryId, Task, TaskPriority, TaskStatus, User, UserId},
    view::completion_rate,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Per-client workload and completion figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPerformance {
    /// Client identifier.
    pub client_id: UserId,
    /// Client display name.
    pub name: String,
    /// Tasks assigned to the client.
    pub total: usize,
    /// Completed tasks assigned to the client.
    pub completed: usize,
    /// Overdue tasks assigned to the client.
    pub overdue: usize,
    /// Completed share of `total` as a rounded percentage.
    pub completion_rate: u8,
}

/// Reports workload figures for every client in `users`, in user order.
///
/// Non-client users are ignored; clients without tasks report zeros.
#[must_use]
pub fn client_performance(
    tasks: &[&Task],
    users: &[User],
    now: DateTime<Utc>,
) -> Vec<ClientPerformance> {
    users
        .iter()
        .filter(|user| user.is_client())
        .map(|client| {
            let assigned = tasks.iter().filter(|task| task.is_assigned_to(client.id()));
            let (total, completed, overdue) =
                assigned.fold((0, 0, 0), |(total, completed, overdue), task| {
                    (
                        total + 1,
                        completed + usize::from(task.status() == TaskStatus::Completed),
                        overdue + usize::from(task.is_overdue(now)),
                    )
                });
            ClientPerformance {
                client_id: client.id().clone(),
                name: client.name().to_owned(),
                total,
                completed,
                overdue,
                completion_rate: completion_rate(completed, total),
            }
        })
        .collect()
}

/// Task counts per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PriorityDistribution {
    /// Low-priority tasks.
    pub low: usize,
    /// Medium-priority tasks.
    pub medium: usize,
    /// High-priority tasks.
    pub high: usize,
}

/// Counts `tasks` per priority.
#[must_use]
pub fn priority_distribution(tasks: &[&Task]) -> PriorityDistribution {
    tasks
        .iter()
        .fold(PriorityDistribution::default(), |mut dist, task| {
            match task.priority() {
                TaskPriority::Low => dist.low += 1,
                TaskPriority::Medium => dist.medium += 1,
                TaskPriority::High => dist.high += 1,
            }
            dist
        })
}

/// Task counts per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDistribution {
    /// Pending tasks.
    pub pending: usize,
    /// In-progress tasks.
    pub in_progress: usize,
    /// Completed tasks.
    pub completed: usize,
}

/// Counts `tasks` per status.
#[must_use]
pub fn status_distribution(tasks: &[&Task]) -> StatusDistribution {
    tasks
        .iter()
        .fold(StatusDistribution::default(), |mut dist, task| {
            match task.status() {
                TaskStatus::Pending => dist.pending += 1,
                TaskStatus::InProgress => dist.in_progress += 1,
                TaskStatus::Completed => dist.completed += 1,
            }
            dist
        })
}

/// Time from creation to completion, in fractional days.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionTimeStats {
    /// Number of completed tasks measured.
    pub count: usize,
    /// Mean days to completion.
    pub mean_days: f64,
    /// Fastest completion in days.
    pub min_days: f64,
    /// Slowest completion in days.
    pub max_days: f64,
}

/// Measures creation-to-completion time over tasks with a completion
/// timestamp. All fields are zero when nothing has been completed.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "fractional day statistics are inherently floating point"
)]
pub fn completion_time_stats(tasks: &[&Task]) -> CompletionTimeStats {
    let durations: Vec<f64> = tasks
        .iter()
        .filter_map(|task| {
            task.completed_at()
                .map(|done| (done - task.created_at()).num_milliseconds() as f64 / MILLIS_PER_DAY)
        })
        .collect();

    if durations.is_empty() {
        return CompletionTimeStats::default();
    }

    let sum: f64 = durations.iter().sum();
    let min_days = durations.iter().copied().fold(f64::INFINITY, f64::min);
    let max_days = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    CompletionTimeStats {
        count: durations.len(),
        mean_days: sum / durations.len() as f64,
        min_days,
        max_days,
    }
}

/// Activity on one calendar day (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Tasks created that day.
    pub created: usize,
    /// Tasks completed that day.
    pub completed: usize,
}

/// Daily created/completed counts for the `days` calendar days ending at
/// `today`, oldest first, with zero-filled gaps.
#[must_use]
pub fn daily_trend(tasks: &[&Task], today: NaiveDate, days: u16) -> Vec<TrendPoint> {
    let mut tallies: HashMap<NaiveDate, (usize, usize)> = HashMap::new();
    for task in tasks {
        tallies.entry(task.created_at().date_naive()).or_default().0 += 1;
        if let Some(done) = task.completed_at() {
            tallies.entry(done.date_naive()).or_default().1 += 1;
        }
    }

    (0..u64::from(days))
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let (created, completed) = tallies.get(&date).copied().unwrap_or_default();
            TrendPoint {
                date,
                created,
                completed,
            }
        })
        .collect()
}

/// Task counts filed under one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    /// Category, or `None` for uncategorized tasks.
    pub category_id: Option<CategoryId>,
    /// Category name, or `"Uncategorized"`.
    pub name: String,
    /// Tasks in the category.
    pub total: usize,
    /// Completed tasks in the category.
    pub completed: usize,
}

/// Counts tasks per category in category order, followed by an
/// uncategorized bucket. Tasks referencing an unknown category count as
/// uncategorized.
#[must_use]
pub fn category_breakdown(tasks: &[&Task], categories: &[Category]) -> Vec<CategoryUsage> {
    let mut usage: Vec<CategoryUsage> = categories
        .iter()
        .map(|category| CategoryUsage {
            category_id: Some(category.id().clone()),
            name: category.name().to_owned(),
            total: 0,
            completed: 0,
        })
        .collect();
    let mut uncategorized = CategoryUsage {
        category_id: None,
        name: "Uncategorized".to_owned(),
        total: 0,
        completed: 0,
    };

    for task in tasks {
        let position = task.category_id().and_then(|id| {
            usage
                .iter()
                .position(|entry| entry.category_id.as_ref() == Some(id))
        });
        let bucket = position
            .and_then(|index| usage.get_mut(index))
            .unwrap_or(&mut uncategorized);
        bucket.total += 1;
        bucket.completed += usize::from(task.status() == TaskStatus::Completed);
    }

    usage.push(uncategorized);
    usage
}

/// Every analytics figure for one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Per-client figures.
    pub clients: Vec<ClientPerformance>,
    /// Priority distribution.
    pub priorities: PriorityDistribution,
    /// Status distribution.
    pub statuses: StatusDistribution,
    /// Completion time statistics.
    pub completion_time: CompletionTimeStats,
    /// Daily trend, oldest first.
    pub trend: Vec<TrendPoint>,
    /// Per-category usage.
    pub categories: Vec<CategoryUsage>,
}

impl Dashboard {
    /// Computes every figure over the already-scoped `tasks`.
    #[must_use]
    pub fn compute(
        tasks: &[&Task],
        users: &[User],
        categories: &[Category],
        now: DateTime<Utc>,
        trend_days: u16,
    ) -> Self {
        Self {
            clients: client_performance(tasks, users, now),
            priorities: priority_distribution(tasks),
            statuses: status_distribution(tasks),
            completion_time: completion_time_stats(tasks),
            trend: daily_trend(tasks, now.date_naive(), trend_days),
            categories: category_breakdown(tasks, categories),
        }
    }
}
