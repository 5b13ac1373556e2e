//! Unit tests for the task board module.

mod support;
mod viewmodel_tests;
