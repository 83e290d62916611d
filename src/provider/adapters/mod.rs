//! Adapter implementations for database providers.
//!
//! - [`postgres`]: PostgreSQL provider and Diesel-backed connection
//! - [`sqlserver`]: SQL Server provider
//! - [`memory`]: recording connection for tests and dry runs

pub mod memory;
pub mod postgres;
mod render;
pub mod sqlserver;
