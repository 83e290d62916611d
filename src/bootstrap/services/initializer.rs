//! One-call startup initialization.

use super::{BootstrapError, SchemaBootstrapper};
use crate::bootstrap::{domain::BootstrapOutcome, ports::ScriptSource};
use crate::config::DataSettings;
use crate::provider::{
    ports::SchemaConnection,
    services::{ProviderRegistry, ProviderRegistryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`initialize_database`].
#[derive(Debug, Clone, Error)]
pub enum InitializeError {
    /// The configured provider could not be resolved.
    #[error(transparent)]
    Registry(#[from] ProviderRegistryError),

    /// The bootstrap run failed.
    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),
}

/// Resolves the configured provider and ensures its schema exists.
///
/// # Errors
///
/// Returns [`InitializeError::Registry`] when the configured provider is not
/// registered, or [`InitializeError::Bootstrap`] when the run fails.
pub fn initialize_database<C>(
    registry: &ProviderRegistry,
    settings: &DataSettings,
    connection: &mut dyn SchemaConnection,
    scripts: &dyn ScriptSource,
    clock: Arc<C>,
) -> Result<BootstrapOutcome, InitializeError>
where
    C: Clock + Send + Sync,
{
    let provider = registry.resolve_configured(settings)?;
    let bootstrapper = SchemaBootstrapper::configured(settings, clock);
    Ok(provider.ensure_initialized(&bootstrapper, connection, scripts)?)
}
