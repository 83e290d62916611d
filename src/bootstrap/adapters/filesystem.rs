//! Script source backed by a directory on disk.

use crate::bootstrap::ports::{ScriptSource, ScriptSourceError};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

/// Reads scripts from one directory.
///
/// Paths are resolved inside the directory only; absolute paths and `..`
/// components that would escape it are refused by `cap-std`.
#[derive(Debug)]
pub struct DirScriptSource {
    root: Dir,
}

impl DirScriptSource {
    /// Opens the script root at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be opened.
    pub fn open(path: &Utf8Path) -> std::io::Result<Self> {
        Dir::open_ambient_dir(path, ambient_authority()).map(Self::from_dir)
    }

    /// Wraps an already opened directory.
    #[must_use]
    pub const fn from_dir(root: Dir) -> Self {
        Self { root }
    }
}

impl ScriptSource for DirScriptSource {
    fn read_script(&self, path: &Utf8Path) -> Result<String, ScriptSourceError> {
        self.root
            .read_to_string(path)
            .map_err(|err| ScriptSourceError::from_io(path, err))
    }
}
