//! Scripts executed during a bootstrap run.

use crate::script;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Role of a script within a bootstrap run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    /// Provider-generated table creation script.
    CreateSchema,
    /// Secondary index script.
    Indexes,
    /// Stored routine script.
    StoredRoutines,
}

impl ScriptKind {
    /// Returns the kind as a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateSchema => "create_schema",
            Self::Indexes => "indexes",
            Self::StoredRoutines => "stored_routines",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Script split into commands, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapScript {
    kind: ScriptKind,
    commands: Vec<String>,
    digest: String,
}

impl BootstrapScript {
    /// Splits `text` into commands and records the SHA-256 digest of the
    /// source text.
    #[must_use]
    pub fn from_text(kind: ScriptKind, text: &str) -> Self {
        Self {
            kind,
            commands: script::split(text),
            digest: format!("{:x}", Sha256::digest(text.as_bytes())),
        }
    }

    /// Returns the script kind.
    #[must_use]
    pub const fn kind(&self) -> ScriptKind {
        self.kind
    }

    /// Returns every command, blank ones included, in textual order.
    #[must_use]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Returns the lowercase hex SHA-256 digest of the source text.
    #[must_use]
    pub fn digest(&self) -> &str {
        &self.digest
    }
}
