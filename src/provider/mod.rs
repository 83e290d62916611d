//! Database provider abstraction for the storefront host.
//!
//! A provider binds the host to one database backend: it describes the
//! backend's capabilities, knows how to introspect its catalog, renders the
//! baseline create script for the backend's SQL dialect, and builds command
//! parameters in the backend's placeholder style. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The provider registry in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod tests;
