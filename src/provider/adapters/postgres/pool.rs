//! Connection pool for hosts that let the crate open the connection.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Connection checked out of a [`PgPool`].
pub type PooledPgConnection = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds a single-connection pool for a bootstrap run.
///
/// One connection is enough: the bootstrap lock and every command must run
/// on the same session.
///
/// # Errors
///
/// Returns [`PoolError`] when the database cannot be reached.
pub fn bootstrap_pool(database_url: &str) -> Result<PgPool, PoolError> {
    Pool::builder()
        .max_size(1)
        .build(ConnectionManager::<PgConnection>::new(database_url))
}
