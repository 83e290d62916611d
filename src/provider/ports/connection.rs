//! Connection port used for catalog introspection and script execution.

use std::sync::Arc;
use thiserror::Error;

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Open connection to the target database.
///
/// The host owns the connection; bootstrap code only borrows it for the
/// duration of one run. Calls are blocking and strictly sequential.
pub trait SchemaConnection {
    /// Runs a query and returns its first column as text, one entry per row.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Query`] when the query cannot be executed.
    fn query_column(&mut self, sql: &str) -> ConnectionResult<Vec<String>>;

    /// Executes one command, which may hold several statements.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Execution`] when the backend rejects the
    /// command.
    fn execute(&mut self, command: &str) -> ConnectionResult<()>;

    /// Blocks until this session holds the bootstrap lock for `key`.
    ///
    /// Backends without session locks keep the default no-op, in which case
    /// two instances bootstrapping a fresh database at the same time may
    /// both attempt creation.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Lock`] when the lock cannot be taken.
    fn acquire_bootstrap_lock(&mut self, _key: i64) -> ConnectionResult<()> {
        Ok(())
    }

    /// Releases the bootstrap lock taken by [`Self::acquire_bootstrap_lock`].
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionError::Lock`] when the lock cannot be released.
    fn release_bootstrap_lock(&mut self, _key: i64) -> ConnectionResult<()> {
        Ok(())
    }
}

/// Errors returned by connection adapters.
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    /// A query could not be executed or its rows could not be read.
    #[error("query failed: {0}")]
    Query(Arc<dyn std::error::Error + Send + Sync>),

    /// A command was rejected by the backend.
    #[error("command failed: {0}")]
    Execution(Arc<dyn std::error::Error + Send + Sync>),

    /// The bootstrap lock could not be acquired or released.
    #[error("session lock failed: {0}")]
    Lock(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConnectionError {
    /// Wraps a query failure.
    pub fn query(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Query(Arc::new(err))
    }

    /// Wraps a command execution failure.
    pub fn execution(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Execution(Arc::new(err))
    }

    /// Wraps a lock failure.
    pub fn lock(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lock(Arc::new(err))
    }
}
