//! Diesel-backed [`SchemaConnection`] for `PostgreSQL`.

use crate::provider::ports::{ConnectionError, ConnectionResult, SchemaConnection};
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};

#[derive(QueryableByName)]
struct TextRow {
    #[diesel(sql_type = Text)]
    value: String,
}

/// Borrowed `PostgreSQL` connection used for one bootstrap run.
///
/// Commands run through the simple query protocol so a single batch may
/// hold several statements, such as a routine definition followed by a
/// grant. The bootstrap lock is a session-level advisory lock.
pub struct PgSchemaConnection<'conn> {
    connection: &'conn mut PgConnection,
}

impl<'conn> PgSchemaConnection<'conn> {
    /// Wraps an open connection owned by the host.
    #[must_use]
    pub const fn new(connection: &'conn mut PgConnection) -> Self {
        Self { connection }
    }
}

impl SchemaConnection for PgSchemaConnection<'_> {
    fn query_column(&mut self, sql: &str) -> ConnectionResult<Vec<String>> {
        let rows = diesel::sql_query(sql)
            .load::<TextRow>(&mut *self.connection)
            .map_err(ConnectionError::query)?;
        Ok(rows.into_iter().map(|row| row.value).collect())
    }

    fn execute(&mut self, command: &str) -> ConnectionResult<()> {
        self.connection
            .batch_execute(command)
            .map_err(ConnectionError::execution)
    }

    fn acquire_bootstrap_lock(&mut self, key: i64) -> ConnectionResult<()> {
        diesel::sql_query("SELECT pg_advisory_lock($1)")
            .bind::<BigInt, _>(key)
            .execute(&mut *self.connection)
            .map_err(ConnectionError::lock)?;
        Ok(())
    }

    fn release_bootstrap_lock(&mut self, key: i64) -> ConnectionResult<()> {
        diesel::sql_query("SELECT pg_advisory_unlock($1)")
            .bind::<BigInt, _>(key)
            .execute(&mut *self.connection)
            .map_err(ConnectionError::lock)?;
        Ok(())
    }
}
