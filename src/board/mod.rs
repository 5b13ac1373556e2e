//! Task board management.
//!
//! The board keeps tasks, users, categories, subtasks, and the activity log
//! in memory, scopes every read and write to the acting viewer, and derives
//! filtered, sorted, and summarised views on demand. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Wire records in [`records`]
//! - Pure view derivation in [`view`] and [`analytics`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Presentation state in [`viewmodel`]

pub mod adapters;
pub mod analytics;
pub mod domain;
pub mod ports;
pub mod records;
pub mod services;
pub mod view;
pub mod viewmodel;

#[cfg(test)]
mod tests;
