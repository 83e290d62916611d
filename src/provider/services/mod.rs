//! Provider registration and resolution.

mod registry;

pub use registry::{
    ProviderFactory, ProviderHandle, ProviderRegistry, ProviderRegistryError,
    ProviderRegistryResult,
};
