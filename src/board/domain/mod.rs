//! Domain model for the task board.
//!
//! Tasks, users, and their satellite records (categories, subtasks,
//! activities) are plain values with validated constructors. Mutation happens
//! only through the owning service, which keeps the status/completion
//! invariants intact and never lets a record leave the domain half-updated.

mod activity;
mod category;
mod error;
mod ids;
mod percent;
mod subtask;
mod task;
mod user;

pub use activity::{Activity, ActivityKind};
pub use category::{Category, DEFAULT_CATEGORY_COLOR, NewCategory};
pub use error::{BoardDomainError, ParseEnumError};
pub use ids::{ActivityId, CategoryId, SubtaskId, TaskId, UserId};
pub use percent::rounded_percentage;
pub use subtask::{Subtask, subtask_progress};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch, TaskPriority, TaskStatus};
pub use user::{NewUser, User, UserRole, Viewer};
