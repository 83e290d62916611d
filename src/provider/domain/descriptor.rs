//! Provider capability descriptor.

use super::ProviderId;
use serde::{Deserialize, Serialize};

/// Read-only capability flags of a database provider.
///
/// Host code consults the descriptor before offering features that depend
/// on the backend, such as database backups or server-side hashing of
/// binary columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    identifier: ProviderId,
    supports_backup: bool,
    max_binary_hash_length: u32,
}

impl ProviderDescriptor {
    /// Creates a descriptor for the given provider.
    ///
    /// `max_binary_hash_length` is the largest input the backend can hash
    /// server-side; `0` means hashing is unsupported.
    #[must_use]
    pub const fn new(
        identifier: ProviderId,
        supports_backup: bool,
        max_binary_hash_length: u32,
    ) -> Self {
        Self {
            identifier,
            supports_backup,
            max_binary_hash_length,
        }
    }

    /// Returns the provider identifier.
    #[must_use]
    pub const fn identifier(&self) -> &ProviderId {
        &self.identifier
    }

    /// Returns whether the backend supports database backups.
    #[must_use]
    pub const fn supports_backup(&self) -> bool {
        self.supports_backup
    }

    /// Returns the maximum binary hash input length, `0` when unsupported.
    #[must_use]
    pub const fn max_binary_hash_length(&self) -> u32 {
        self.max_binary_hash_length
    }

    /// Returns whether the backend can hash binary data server-side.
    #[must_use]
    pub const fn supports_binary_hash(&self) -> bool {
        self.max_binary_hash_length > 0
    }
}
