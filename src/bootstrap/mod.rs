//! Idempotent schema bootstrap.
//!
//! On startup the host hands the bootstrapper an open connection, the
//! resolved provider and a script source. The bootstrapper probes the
//! catalog for the signature tables and, when none exist, runs the
//! provider's create script followed by the index and stored routine
//! scripts. A second run against an initialized database changes nothing.
//!
//! - Domain types in [`domain`]
//! - The script source port in [`ports`]
//! - Script sources in [`adapters`]
//! - The bootstrapper itself in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
