//! Outcome of a bootstrap run.

use super::{BootstrapRunId, ScriptKind};
use crate::provider::domain::ProviderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Execution summary of one script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedScript {
    kind: ScriptKind,
    digest: String,
    commands_executed: usize,
    commands_skipped: usize,
}

impl ExecutedScript {
    /// Creates a script summary.
    #[must_use]
    pub fn new(
        kind: ScriptKind,
        digest: impl Into<String>,
        commands_executed: usize,
        commands_skipped: usize,
    ) -> Self {
        Self {
            kind,
            digest: digest.into(),
            commands_executed,
            commands_skipped,
        }
    }

    /// Returns the script kind.
    #[must_use]
    pub const fn kind(&self) -> ScriptKind {
        self.kind
    }

    /// Returns the SHA-256 digest of the script source.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Returns how many commands ran.
    #[must_use]
    pub const fn commands_executed(&self) -> usize {
        self.commands_executed
    }

    /// Returns how many blank commands were skipped.
    #[must_use]
    pub const fn commands_skipped(&self) -> usize {
        self.commands_skipped
    }
}

/// Record of a run that created the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapReport {
    run_id: BootstrapRunId,
    provider: ProviderId,
    scripts: Vec<ExecutedScript>,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
}

impl BootstrapReport {
    /// Creates a report for a completed run.
    #[must_use]
    pub const fn new(
        run_id: BootstrapRunId,
        provider: ProviderId,
        scripts: Vec<ExecutedScript>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id,
            provider,
            scripts,
            started_at,
            finished_at,
        }
    }

    /// Returns the run identifier.
    #[must_use]
    pub const fn run_id(&self) -> BootstrapRunId {
        self.run_id
    }

    /// Returns the provider that created the schema.
    #[must_use]
    pub const fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the executed scripts in execution order.
    #[must_use]
    pub fn scripts(&self) -> &[ExecutedScript] {
        &self.scripts
    }

    /// Returns the total number of commands executed across all scripts.
    #[must_use]
    pub fn commands_executed(&self) -> usize {
        self.scripts.iter().map(ExecutedScript::commands_executed).sum()
    }

    /// Returns when the run started creating the schema.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns when the last script finished.
    #[must_use]
    pub const fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }
}

/// Result of [`ensure_initialized`](crate::bootstrap::services::SchemaBootstrapper::ensure_initialized).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Signature tables were found; nothing was executed.
    AlreadyInitialized {
        /// Signature tables present in the catalog.
        matched: Vec<String>,
    },
    /// The schema was created by this run.
    Created(BootstrapReport),
}

impl BootstrapOutcome {
    /// Returns whether this run created the schema.
    #[must_use]
    pub const fn created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}
