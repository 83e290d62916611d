//! Host data settings.
//!
//! Settings are read from a JSON file placed next to the host's other
//! configuration and may be overridden from the environment:
//!
//! - `STOREHOUSE_DATA_PROVIDER` replaces `data_provider`
//! - `DATABASE_URL` replaces `connection_string`
//!
//! Relative paths inside the file are resolved against the file's own
//! directory, not the process working directory.

use crate::bootstrap::services::DEFAULT_BOOTSTRAP_LOCK_KEY;
use crate::provider::domain::SchemaModel;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Environment variable overriding the configured provider.
pub const DATA_PROVIDER_ENV: &str = "STOREHOUSE_DATA_PROVIDER";

/// Environment variable overriding the configured connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while loading settings or the schema model.
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: Arc<std::io::Error>,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that could not be parsed.
        path: Utf8PathBuf,
        /// Parser diagnostic.
        source: Arc<serde_json::Error>,
    },

    /// A required setting is absent or empty.
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

/// Data settings of the storefront host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataSettings {
    data_provider: String,
    #[serde(default)]
    connection_string: Option<String>,
    #[serde(default)]
    schema_model_path: Option<Utf8PathBuf>,
    #[serde(default = "default_scripts_root")]
    scripts_root: Utf8PathBuf,
    #[serde(default)]
    indexes_script: Option<Utf8PathBuf>,
    #[serde(default)]
    stored_procedures_script: Option<Utf8PathBuf>,
    #[serde(default = "default_bootstrap_lock_key")]
    bootstrap_lock_key: i64,
    #[serde(skip)]
    base_dir: Option<Utf8PathBuf>,
}

fn default_scripts_root() -> Utf8PathBuf {
    Utf8PathBuf::from("App_Data/Install")
}

const fn default_bootstrap_lock_key() -> i64 {
    DEFAULT_BOOTSTRAP_LOCK_KEY
}

impl DataSettings {
    /// Creates settings for a provider with every other value defaulted.
    #[must_use]
    pub fn new(data_provider: impl Into<String>) -> Self {
        Self {
            data_provider: data_provider.into(),
            connection_string: None,
            schema_model_path: None,
            scripts_root: default_scripts_root(),
            indexes_script: None,
            stored_procedures_script: None,
            bootstrap_lock_key: DEFAULT_BOOTSTRAP_LOCK_KEY,
            base_dir: None,
        }
    }

    /// Loads settings from a JSON file and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the file cannot be read or parsed, or
    /// when no provider is configured after overrides.
    pub fn load(path: &Utf8Path) -> Result<Self, SettingsError> {
        let contents = read_utf8_file(path)?;
        let mut settings = Self::from_json(&contents).map_err(|err| SettingsError::Parse {
            path: path.to_owned(),
            source: Arc::new(err),
        })?;
        settings.base_dir = path.parent().map(Utf8Path::to_owned);
        settings
            .with_env_overrides(|key| std::env::var(key).ok())
            .validated()
    }

    /// Parses settings from JSON text without touching the environment.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] when the text is not valid
    /// settings JSON or names a field the settings do not have.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Applies overrides found through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(provider) = lookup(DATA_PROVIDER_ENV) {
            self.data_provider = provider;
        }
        if let Some(url) = lookup(DATABASE_URL_ENV) {
            self.connection_string = Some(url);
        }
        self
    }

    /// Checks that a provider is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when `data_provider` is blank.
    pub fn validated(self) -> Result<Self, SettingsError> {
        if self.data_provider.trim().is_empty() {
            return Err(SettingsError::Missing("data_provider"));
        }
        Ok(self)
    }

    /// Sets the connection string.
    #[must_use]
    pub fn with_connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.connection_string = Some(connection_string.into());
        self
    }

    /// Sets the script root directory.
    #[must_use]
    pub fn with_scripts_root(mut self, scripts_root: impl Into<Utf8PathBuf>) -> Self {
        self.scripts_root = scripts_root.into();
        self
    }

    /// Returns the configured provider identifier.
    #[must_use]
    pub fn data_provider(&self) -> &str {
        &self.data_provider
    }

    /// Returns the connection string, if configured.
    #[must_use]
    pub fn connection_string(&self) -> Option<&str> {
        self.connection_string.as_deref()
    }

    /// Returns the schema model location resolved against the settings file.
    #[must_use]
    pub fn schema_model_path(&self) -> Option<Utf8PathBuf> {
        self.schema_model_path.as_deref().map(|path| self.resolve(path))
    }

    /// Returns the script root resolved against the settings file.
    #[must_use]
    pub fn scripts_root(&self) -> Utf8PathBuf {
        self.resolve(&self.scripts_root)
    }

    /// Returns the key of the bootstrap lock.
    #[must_use]
    pub const fn bootstrap_lock_key(&self) -> i64 {
        self.bootstrap_lock_key
    }

    /// Returns the index script override, if configured.
    #[must_use]
    pub fn indexes_script(&self) -> Option<&Utf8Path> {
        self.indexes_script.as_deref()
    }

    /// Returns the stored routine script override, if configured.
    #[must_use]
    pub fn stored_procedures_script(&self) -> Option<&Utf8Path> {
        self.stored_procedures_script.as_deref()
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_owned(),
        }
    }
}

/// Loads and validates a schema model from a JSON file.
///
/// # Errors
///
/// Returns [`SettingsError`] when the file cannot be read, is not valid
/// JSON, or describes an invalid model.
pub fn load_schema_model(path: &Utf8Path) -> Result<SchemaModel, SettingsError> {
    let contents = read_utf8_file(path)?;
    serde_json::from_str(&contents).map_err(|err| SettingsError::Parse {
        path: path.to_owned(),
        source: Arc::new(err),
    })
}

fn read_utf8_file(path: &Utf8Path) -> Result<String, SettingsError> {
    let read_error = |err: std::io::Error| SettingsError::Read {
        path: path.to_owned(),
        source: Arc::new(err),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| read_error(std::io::Error::other("path must include a file name")))?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(file_name).map_err(read_error)
}
