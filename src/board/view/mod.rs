//! Derived View Engine.
//!
//! A pure pipeline that turns the authoritative task collection into what a
//! viewer sees: scope restriction, client filter, status filter, text search,
//! sort, and summary counts. Nothing here mutates its input or reads a clock;
//! the caller supplies `now`.

mod counts;
mod engine;
mod query;

pub use counts::{TaskCounts, completion_rate, is_overdue};
pub use engine::{DerivedView, derive_view, scope_tasks, sort_tasks};
pub use query::{ClientFilter, SortPolicy, StatusFilter, ViewQuery, ViewerScope};
