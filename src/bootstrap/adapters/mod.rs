//! Script source implementations.
//!
//! - [`filesystem`]: scripts under a capability-scoped directory
//! - [`memory`]: scripts held in memory, for tests and embedded hosts

pub mod filesystem;
pub mod memory;
