//! Storehouse: database provider abstraction and schema bootstrap for a
//! storefront host.
//!
//! The host picks a database backend by name in its data settings. This
//! crate resolves that name to a provider, then makes sure the baseline
//! schema exists before the host serves traffic.
//!
//! # Architecture
//!
//! Storehouse follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types with no infrastructure dependencies
//! - **Ports**: Trait interfaces for connections and script sources
//! - **Adapters**: Concrete implementations (Diesel, filesystem, memory)
//!
//! # Modules
//!
//! - [`script`]: Splitting batch-delimited SQL scripts into commands
//! - [`bootstrap`]: Idempotent creation of the baseline schema
//! - [`provider`]: Provider contract, built-in providers and the registry
//! - [`config`]: Host data settings

pub mod bootstrap;
pub mod config;
pub mod provider;
pub mod script;
