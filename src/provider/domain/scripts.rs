//! Locations of the auxiliary bootstrap scripts.

use super::ProviderId;
use camino::{Utf8Path, Utf8PathBuf};

/// Logical paths of the index and stored routine scripts for one provider.
///
/// Paths are relative to the host's script root and resolved by a script
/// source, never against the process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxiliaryScripts {
    indexes: Utf8PathBuf,
    stored_procedures: Utf8PathBuf,
}

impl AuxiliaryScripts {
    /// Creates script locations from explicit paths.
    #[must_use]
    pub fn new(indexes: impl Into<Utf8PathBuf>, stored_procedures: impl Into<Utf8PathBuf>) -> Self {
        Self {
            indexes: indexes.into(),
            stored_procedures: stored_procedures.into(),
        }
    }

    /// Returns the conventional locations for a provider:
    /// `<id>.indexes.sql` and `<id>.storedprocedures.sql`.
    #[must_use]
    pub fn for_provider(identifier: &ProviderId) -> Self {
        Self::new(
            format!("{identifier}.indexes.sql"),
            format!("{identifier}.storedprocedures.sql"),
        )
    }

    /// Replaces the index script location when an override is given.
    #[must_use]
    pub fn with_indexes_override(mut self, path: Option<Utf8PathBuf>) -> Self {
        if let Some(indexes) = path {
            self.indexes = indexes;
        }
        self
    }

    /// Replaces the stored routine script location when an override is given.
    #[must_use]
    pub fn with_stored_procedures_override(mut self, path: Option<Utf8PathBuf>) -> Self {
        if let Some(stored_procedures) = path {
            self.stored_procedures = stored_procedures;
        }
        self
    }

    /// Returns the secondary index script location.
    #[must_use]
    pub fn indexes(&self) -> &Utf8Path {
        &self.indexes
    }

    /// Returns the stored routine script location.
    #[must_use]
    pub fn stored_procedures(&self) -> &Utf8Path {
        &self.stored_procedures
    }
}
