//! Adapter implementations of the record store port.

pub mod file;
pub mod memory;
