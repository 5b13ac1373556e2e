//! Scope, filter, sort, and summarise.

use super::{SortPolicy, TaskCounts, ViewQuery, ViewerScope};
use crate::board::domain::Task;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Output of the Derived View Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    /// Filtered tasks in display order.
    pub tasks: Vec<Task>,
    /// Counts over the scoped set, before the view filters.
    pub counts: TaskCounts,
}

/// Restricts `tasks` to those inside `scope`, preserving order.
///
/// This is the authorization boundary: no view filter can widen it.
#[must_use]
pub fn scope_tasks<'a>(
    tasks: impl IntoIterator<Item = &'a Task>,
    scope: &ViewerScope,
) -> Vec<&'a Task> {
    tasks.into_iter().filter(|task| scope.contains(task)).collect()
}

/// Derives the view of `tasks` seen under `scope` with `query` applied.
///
/// Counts are computed over the scoped set; the returned tasks additionally
/// pass the client, status, and text filters and are ordered by the query's
/// sort policy. Never fails: empty input yields an empty view with zero
/// counts.
#[must_use]
pub fn derive_view(
    tasks: &[Task],
    scope: &ViewerScope,
    query: &ViewQuery,
    now: DateTime<Utc>,
) -> DerivedView {
    let scoped = scope_tasks(tasks, scope);
    let counts = TaskCounts::tally(scoped.iter().copied(), now, scope.is_all());
    let needle = query.search_needle();

    let mut visible: Vec<&Task> = scoped
        .into_iter()
        .filter(|task| query.client.matches(task))
        .filter(|task| query.status.matches(task))
        .filter(|task| needle.as_deref().is_none_or(|text| task.matches_text(text)))
        .collect();
    sort_tasks(&mut visible, query.sort, now);

    tracing::debug!(
        scoped = counts.total,
        visible = visible.len(),
        "derived task view"
    );

    DerivedView {
        tasks: visible.into_iter().cloned().collect(),
        counts,
    }
}

/// Sorts `tasks` in place by `policy`. The sort is stable.
pub fn sort_tasks(tasks: &mut [&Task], policy: SortPolicy, now: DateTime<Utc>) {
    match policy {
        SortPolicy::AdminDefault => tasks.sort_by(|a, b| newest_first(a, b)),
        SortPolicy::ClientDefault => tasks.sort_by(|a, b| client_order(a, b, now)),
    }
}

fn newest_first(a: &Task, b: &Task) -> Ordering {
    b.created_at().cmp(&a.created_at())
}

fn client_order(a: &Task, b: &Task, now: DateTime<Utc>) -> Ordering {
    b.is_overdue(now)
        .cmp(&a.is_overdue(now))
        .then_with(|| match (a.due_date(), b.due_date()) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => newest_first(a, b),
        })
}
