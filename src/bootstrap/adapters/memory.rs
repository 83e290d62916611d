//! In-memory script source.

use crate::bootstrap::ports::{ScriptSource, ScriptSourceError};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;

/// Script source holding scripts keyed by logical path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScriptSource {
    scripts: HashMap<Utf8PathBuf, String>,
}

impl InMemoryScriptSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a script at `path`, replacing any previous one.
    #[must_use]
    pub fn with_script(mut self, path: impl Into<Utf8PathBuf>, text: impl Into<String>) -> Self {
        self.scripts.insert(path.into(), text.into());
        self
    }
}

impl ScriptSource for InMemoryScriptSource {
    fn read_script(&self, path: &Utf8Path) -> Result<String, ScriptSourceError> {
        self.scripts
            .get(path)
            .cloned()
            .ok_or_else(|| ScriptSourceError::NotFound(path.to_owned()))
    }
}
