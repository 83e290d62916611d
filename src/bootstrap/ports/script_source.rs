//! Source of the auxiliary bootstrap scripts.

use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Reads scripts by logical path, relative to a script root the source owns.
#[cfg_attr(test, mockall::automock)]
pub trait ScriptSource {
    /// Returns the full text of the script at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptSourceError::NotFound`] when no script exists at the
    /// path, or [`ScriptSourceError::Unreadable`] when it cannot be read.
    fn read_script(&self, path: &Utf8Path) -> Result<String, ScriptSourceError>;
}

/// Errors returned by script sources.
#[derive(Debug, Clone, Error)]
pub enum ScriptSourceError {
    /// No script exists at the path.
    #[error("script not found: {0}")]
    NotFound(Utf8PathBuf),

    /// The script exists but could not be read.
    #[error("failed to read script {path}: {source}")]
    Unreadable {
        /// Logical path of the script.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },
}

impl ScriptSourceError {
    /// Classifies an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Utf8Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_owned())
        } else {
            Self::Unreadable {
                path: path.to_owned(),
                source: Arc::new(err),
            }
        }
    }
}
