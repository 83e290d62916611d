//! Recording [`SchemaConnection`] for tests and dry runs.

use crate::provider::ports::{ConnectionError, ConnectionResult, SchemaConnection};

const CREATE_TABLE_PREFIX: &str = "CREATE TABLE ";

/// Bootstrap lock call observed by a [`RecordingConnection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockEvent {
    /// The lock for the key was acquired.
    Acquired(i64),
    /// The lock for the key was released.
    Released(i64),
}

/// Connection double that records every call in order.
///
/// Executed `CREATE TABLE` commands add the table to the simulated catalog,
/// so a second bootstrap run observes the schema created by the first.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnection {
    tables: Vec<String>,
    queries: Vec<String>,
    attempted: Vec<String>,
    executed: Vec<String>,
    lock_events: Vec<LockEvent>,
    failing_fragment: Option<String>,
    fail_queries: bool,
    fail_lock_acquire: bool,
    fail_lock_release: bool,
}

impl RecordingConnection {
    /// Creates a connection to an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the simulated catalog with existing base tables.
    #[must_use]
    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.extend(tables.into_iter().map(Into::into));
        self
    }

    /// Fails every command whose text contains `fragment`.
    #[must_use]
    pub fn failing_on(mut self, fragment: impl Into<String>) -> Self {
        self.failing_fragment = Some(fragment.into());
        self
    }

    /// Fails every query, as a lost connection would.
    #[must_use]
    pub const fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// Fails every attempt to take the bootstrap lock.
    #[must_use]
    pub const fn failing_lock_acquire(mut self) -> Self {
        self.fail_lock_acquire = true;
        self
    }

    /// Fails every attempt to release the bootstrap lock.
    #[must_use]
    pub const fn failing_lock_release(mut self) -> Self {
        self.fail_lock_release = true;
        self
    }

    /// Returns the tables currently in the simulated catalog.
    #[must_use]
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Returns every query issued, in order.
    #[must_use]
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Returns every command attempted, including the failing one.
    #[must_use]
    pub fn attempted(&self) -> &[String] {
        &self.attempted
    }

    /// Returns every command that succeeded, in order.
    #[must_use]
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Returns the bootstrap lock calls, in order.
    #[must_use]
    pub fn lock_events(&self) -> &[LockEvent] {
        &self.lock_events
    }
}

impl SchemaConnection for RecordingConnection {
    fn query_column(&mut self, sql: &str) -> ConnectionResult<Vec<String>> {
        self.queries.push(sql.to_owned());
        if self.fail_queries {
            return Err(ConnectionError::query(std::io::Error::other(
                "connection refused",
            )));
        }
        Ok(self.tables.clone())
    }

    fn execute(&mut self, command: &str) -> ConnectionResult<()> {
        self.attempted.push(command.to_owned());
        if self
            .failing_fragment
            .as_deref()
            .is_some_and(|fragment| command.contains(fragment))
        {
            return Err(ConnectionError::execution(std::io::Error::other(format!(
                "injected failure executing: {command}"
            ))));
        }
        if let Some(table) = created_table_name(command) {
            self.tables.push(table);
        }
        self.executed.push(command.to_owned());
        Ok(())
    }

    fn acquire_bootstrap_lock(&mut self, key: i64) -> ConnectionResult<()> {
        if self.fail_lock_acquire {
            return Err(ConnectionError::lock(std::io::Error::other(
                "lock wait cancelled",
            )));
        }
        self.lock_events.push(LockEvent::Acquired(key));
        Ok(())
    }

    fn release_bootstrap_lock(&mut self, key: i64) -> ConnectionResult<()> {
        if self.fail_lock_release {
            return Err(ConnectionError::lock(std::io::Error::other(
                "session closed before unlock",
            )));
        }
        self.lock_events.push(LockEvent::Released(key));
        Ok(())
    }
}

fn created_table_name(command: &str) -> Option<String> {
    let statement = command.trim_start();
    let prefix = statement.get(..CREATE_TABLE_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(CREATE_TABLE_PREFIX) {
        return None;
    }
    let rest = statement.get(CREATE_TABLE_PREFIX.len()..)?.trim_start();
    let name: String = rest
        .chars()
        .take_while(|c| !c.is_whitespace() && *c != '(')
        .filter(|c| !matches!(c, '"' | '[' | ']'))
        .collect();
    (!name.is_empty()).then_some(name)
}
