//! Step definitions for derived view scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
