//! Validated provider identifier.

use super::ProviderDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a provider identifier.
const MAX_ID_LENGTH: usize = 64;

/// Validated, lowercase alphanumeric-plus-underscores provider identifier.
///
/// Identifiers name a backend in configuration and in the provider registry
/// (e.g. `postgresql`, `sqlserver`). Normalization makes lookups
/// case-insensitive, so `PostgreSQL` and `postgresql` are the same provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Creates a validated provider identifier.
    ///
    /// The input is trimmed and lowercased. Only characters in `[a-z0-9_]`
    /// are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderDomainError::EmptyProviderId`] when the value is
    /// empty after trimming, [`ProviderDomainError::InvalidProviderId`] when
    /// it contains characters outside `[a-z0-9_]`, or
    /// [`ProviderDomainError::ProviderIdTooLong`] when it exceeds 64
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProviderDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(ProviderDomainError::EmptyProviderId);
        }

        if normalized.len() > MAX_ID_LENGTH {
            return Err(ProviderDomainError::ProviderIdTooLong(raw));
        }

        let is_valid = normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if !is_valid {
            return Err(ProviderDomainError::InvalidProviderId(raw));
        }

        Ok(Self(normalized))
    }

    /// Wraps an identifier known to be valid at compile time.
    ///
    /// Only used for the built-in providers, whose identifiers are lowercase
    /// constants.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_owned())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProviderId {
    type Error = ProviderDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(value: ProviderId) -> Self {
        value.0
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
