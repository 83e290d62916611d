//! Step definitions for schema bootstrap scenarios.

pub mod then;
pub mod when;
pub mod world;
