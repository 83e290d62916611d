//! Port contracts for database providers.
//!
//! Ports define infrastructure-agnostic interfaces: the capability contract
//! every backend variant implements and the connection the bootstrapper
//! talks through.

pub mod connection;
pub mod provider;

pub use connection::{ConnectionError, ConnectionResult, SchemaConnection};
pub use provider::{DataProvider, ScriptGenerationError};
