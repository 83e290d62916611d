//! SQL Server provider.
//!
//! Only the provider contract lives here; hosts targeting SQL Server supply
//! their own [`SchemaConnection`](crate::provider::ports::SchemaConnection)
//! over the driver they use.

mod provider;

pub use provider::{INTROSPECTION_QUERY, SQLSERVER_PROVIDER_ID, SqlServerDataProvider};
