//! Probe-then-create bootstrap of the baseline schema.

use crate::bootstrap::{
    domain::{
        BootstrapOutcome, BootstrapReport, BootstrapRunId, BootstrapScript, ExecutedScript,
        ScriptKind, SignatureTables,
    },
    ports::{ScriptSource, ScriptSourceError},
};
use crate::config::DataSettings;
use crate::provider::{
    domain::AuxiliaryScripts,
    ports::{ConnectionError, DataProvider, SchemaConnection, ScriptGenerationError},
};
use crate::script::is_executable;
use camino::Utf8PathBuf;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Session lock key used when settings do not name one.
pub const DEFAULT_BOOTSTRAP_LOCK_KEY: i64 = 7_316_712;

/// Errors returned by a bootstrap run.
#[derive(Debug, Clone, Error)]
pub enum BootstrapError {
    /// The catalog introspection query failed.
    #[error("schema probe failed: {0}")]
    ProbeFailed(#[source] ConnectionError),

    /// The provider could not render its create script.
    #[error(transparent)]
    ScriptGeneration(#[from] ScriptGenerationError),

    /// An auxiliary script could not be read. None of its commands ran.
    #[error("{kind} script {path} is unavailable: {source}")]
    ScriptSourceMissing {
        /// Script that could not be read.
        kind: ScriptKind,
        /// Logical path of the script.
        path: Utf8PathBuf,
        /// Script source error.
        source: ScriptSourceError,
    },

    /// A command was rejected. Later commands and scripts did not run.
    #[error("{script} command #{index} failed: {source}")]
    CommandFailed {
        /// Script holding the failed command.
        script: ScriptKind,
        /// Zero-based position of the command within its script.
        index: usize,
        /// Text of the failed command.
        command: String,
        /// Driver error.
        source: ConnectionError,
    },

    /// The bootstrap lock could not be acquired or released.
    #[error("bootstrap lock failed: {0}")]
    Lock(#[source] ConnectionError),
}

/// Result type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;

/// Creates the baseline schema when, and only when, it is absent.
#[derive(Clone)]
pub struct SchemaBootstrapper<C>
where
    C: Clock + Send + Sync,
{
    signatures: SignatureTables,
    lock_key: i64,
    indexes_script: Option<Utf8PathBuf>,
    stored_procedures_script: Option<Utf8PathBuf>,
    clock: Arc<C>,
}

impl<C> SchemaBootstrapper<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a bootstrapper with the default signature tables and lock key.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            signatures: SignatureTables::default(),
            lock_key: DEFAULT_BOOTSTRAP_LOCK_KEY,
            indexes_script: None,
            stored_procedures_script: None,
            clock,
        }
    }

    /// Creates a bootstrapper using the lock key and script overrides from
    /// the host's data settings.
    #[must_use]
    pub fn configured(settings: &DataSettings, clock: Arc<C>) -> Self {
        Self::new(clock)
            .with_lock_key(settings.bootstrap_lock_key())
            .with_script_overrides(
                settings.indexes_script().map(ToOwned::to_owned),
                settings.stored_procedures_script().map(ToOwned::to_owned),
            )
    }

    /// Replaces the signature tables.
    #[must_use]
    pub fn with_signature_tables(mut self, signatures: SignatureTables) -> Self {
        self.signatures = signatures;
        self
    }

    /// Replaces the bootstrap lock key.
    #[must_use]
    pub const fn with_lock_key(mut self, lock_key: i64) -> Self {
        self.lock_key = lock_key;
        self
    }

    /// Overrides the provider's default auxiliary script locations.
    #[must_use]
    pub fn with_script_overrides(
        mut self,
        indexes: Option<Utf8PathBuf>,
        stored_procedures: Option<Utf8PathBuf>,
    ) -> Self {
        self.indexes_script = indexes;
        self.stored_procedures_script = stored_procedures;
        self
    }

    /// Returns the auxiliary script locations used for `provider`.
    #[must_use]
    pub fn auxiliary_scripts(&self, provider: &dyn DataProvider) -> AuxiliaryScripts {
        provider
            .auxiliary_scripts()
            .with_indexes_override(self.indexes_script.clone())
            .with_stored_procedures_override(self.stored_procedures_script.clone())
    }

    /// Creates the baseline schema unless a signature table already exists.
    ///
    /// The run holds the connection's bootstrap lock from before the probe
    /// until the last command, and releases it on every path. Scripts run
    /// in order: the provider's create script, then the index script, then
    /// the stored routine script. The first failure stops the run; commands
    /// that already ran are not rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError`] when the lock, the probe, script
    /// generation, a script read or a command fails.
    pub fn ensure_initialized(
        &self,
        connection: &mut dyn SchemaConnection,
        provider: &dyn DataProvider,
        scripts: &dyn ScriptSource,
    ) -> BootstrapResult<BootstrapOutcome> {
        let run_id = BootstrapRunId::new();
        let span = tracing::info_span!(
            "bootstrap",
            run_id = %run_id,
            provider = %provider.descriptor().identifier()
        );
        let _entered = span.enter();

        connection
            .acquire_bootstrap_lock(self.lock_key)
            .map_err(BootstrapError::Lock)?;
        let outcome = self.run_locked(run_id, connection, provider, scripts);
        let released = connection.release_bootstrap_lock(self.lock_key);

        match (outcome, released) {
            (Ok(created), Ok(())) => Ok(created),
            (Ok(_), Err(err)) => Err(BootstrapError::Lock(err)),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(release_err)) => {
                warn!(error = %release_err, "failed to release bootstrap lock");
                Err(err)
            }
        }
    }

    fn run_locked(
        &self,
        run_id: BootstrapRunId,
        connection: &mut dyn SchemaConnection,
        provider: &dyn DataProvider,
        scripts: &dyn ScriptSource,
    ) -> BootstrapResult<BootstrapOutcome> {
        let probe = provider
            .probe_schema(connection)
            .map_err(BootstrapError::ProbeFailed)?;
        let matched = self.signatures.matched_in(&probe);
        if !matched.is_empty() {
            info!(matched = ?matched, "schema already initialized");
            return Ok(BootstrapOutcome::AlreadyInitialized { matched });
        }

        info!("no signature tables found, creating schema");
        let started_at = self.clock.utc();
        let create_script =
            BootstrapScript::from_text(ScriptKind::CreateSchema, &provider.generate_create_script()?);
        let mut executed = vec![run_script(connection, &create_script)?];

        let auxiliary = self.auxiliary_scripts(provider);
        for (kind, path) in [
            (ScriptKind::Indexes, auxiliary.indexes()),
            (ScriptKind::StoredRoutines, auxiliary.stored_procedures()),
        ] {
            let text = scripts
                .read_script(path)
                .map_err(|source| BootstrapError::ScriptSourceMissing {
                    kind,
                    path: path.to_owned(),
                    source,
                })?;
            executed.push(run_script(connection, &BootstrapScript::from_text(kind, &text))?);
        }

        let report = BootstrapReport::new(
            run_id,
            provider.descriptor().identifier().clone(),
            executed,
            started_at,
            self.clock.utc(),
        );
        info!(commands = report.commands_executed(), "schema created");
        Ok(BootstrapOutcome::Created(report))
    }
}

fn run_script(
    connection: &mut dyn SchemaConnection,
    script: &BootstrapScript,
) -> BootstrapResult<ExecutedScript> {
    let mut commands_executed = 0;
    let mut commands_skipped = 0;
    for (index, command) in script.commands().iter().enumerate() {
        if !is_executable(command) {
            commands_skipped += 1;
            continue;
        }
        debug!(script = %script.kind(), index, "executing command");
        connection
            .execute(command)
            .map_err(|source| BootstrapError::CommandFailed {
                script: script.kind(),
                index,
                command: command.clone(),
                source,
            })?;
        commands_executed += 1;
    }

    info!(
        script = %script.kind(),
        digest = script.digest(),
        commands_executed,
        commands_skipped,
        "script applied"
    );
    Ok(ExecutedScript::new(
        script.kind(),
        script.digest(),
        commands_executed,
        commands_skipped,
    ))
}
