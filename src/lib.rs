//! Taskboard: role-scoped task management.
//!
//! Administrators create, edit, and assign tasks; clients see and update the
//! tasks assigned to them. All state lives in an in-memory collection owned
//! by a single writer and is flushed to a key-value record store after every
//! mutation.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Plain records and their invariants
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete store implementations (memory, directory)
//! - **Services**: Role-checked orchestration over the collections
//!
//! # Modules
//!
//! - [`board`]: Task board domain, derived views, analytics, and services
//! - [`config`]: Runtime configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod board;
pub mod config;
pub mod telemetry;
