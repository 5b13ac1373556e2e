//! Presentation state for board screens.
//!
//! View models hold the viewer's current filter selection and re-derive the
//! task list from the board on request. Rendering is an explicit call: the
//! caller re-renders after each mutation it performs.

mod dashboard;
mod debounce;

pub use dashboard::DashboardViewModel;
pub use debounce::SearchDebouncer;
