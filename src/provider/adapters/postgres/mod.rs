//! PostgreSQL provider and Diesel-backed schema connection.

mod connection;
mod pool;
mod provider;

pub use connection::PgSchemaConnection;
pub use pool::{PgPool, PooledPgConnection, bootstrap_pool};
pub use provider::{INTROSPECTION_QUERY, POSTGRES_PROVIDER_ID, PostgresDataProvider};
