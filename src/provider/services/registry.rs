//! Registry mapping provider identifiers to provider instances.
//!
//! The registry is built once during startup and then shared by reference.
//! Registration needs `&mut self`; resolution only reads, so any number of
//! callers may resolve concurrently.

use crate::bootstrap::{
    domain::BootstrapOutcome,
    ports::ScriptSource,
    services::{BootstrapResult, SchemaBootstrapper},
};
use crate::config::DataSettings;
use crate::provider::{
    adapters::{postgres::PostgresDataProvider, sqlserver::SqlServerDataProvider},
    domain::{ProviderDescriptor, ProviderDomainError, ProviderId, SchemaModel},
    ports::{DataProvider, SchemaConnection},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Builds the provider instance bound to a registry entry.
pub type ProviderFactory = Box<dyn Fn() -> Arc<dyn DataProvider> + Send + Sync>;

/// Errors returned by the provider registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderRegistryError {
    /// No provider was registered under the requested identifier.
    #[error("unknown data provider: {0}")]
    UnknownProvider(String),

    /// A provider with the same identifier is already registered.
    #[error("duplicate data provider: {0}")]
    DuplicateProvider(ProviderId),

    /// The registration identifier differs from the descriptor's identifier.
    #[error("provider registered as '{identifier}' describes itself as '{descriptor}'")]
    IdentifierMismatch {
        /// Identifier passed to `register`.
        identifier: ProviderId,
        /// Identifier carried by the descriptor.
        descriptor: ProviderId,
    },

    /// The factory built a provider whose descriptor differs from the
    /// registered one.
    #[error("provider '{0}' does not match its registered descriptor")]
    DescriptorMismatch(ProviderId),

    /// The registration identifier failed validation.
    #[error(transparent)]
    InvalidIdentifier(#[from] ProviderDomainError),
}

/// Result type for provider registry operations.
pub type ProviderRegistryResult<T> = Result<T, ProviderRegistryError>;

/// Shared handle to a resolved provider.
///
/// Every handle resolved from the same registry entry points at the same
/// instance.
#[derive(Clone)]
pub struct ProviderHandle {
    provider: Arc<dyn DataProvider>,
}

impl ProviderHandle {
    /// Returns whether both handles point at the same provider instance.
    #[must_use]
    pub fn same_instance(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.provider, &other.provider)
    }

    /// Runs `bootstrapper` against `connection` with this provider.
    ///
    /// # Errors
    ///
    /// Returns the bootstrap error when the run fails.
    pub fn ensure_initialized<C>(
        &self,
        bootstrapper: &SchemaBootstrapper<C>,
        connection: &mut dyn SchemaConnection,
        scripts: &dyn ScriptSource,
    ) -> BootstrapResult<BootstrapOutcome>
    where
        C: Clock + Send + Sync,
    {
        bootstrapper.ensure_initialized(connection, &*self.provider, scripts)
    }
}

impl Deref for ProviderHandle {
    type Target = dyn DataProvider;

    fn deref(&self) -> &Self::Target {
        &*self.provider
    }
}

impl fmt::Debug for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("descriptor", self.provider.descriptor())
            .finish()
    }
}

struct RegistryEntry {
    descriptor: ProviderDescriptor,
    factory: ProviderFactory,
    instance: OnceLock<Arc<dyn DataProvider>>,
}

/// Explicit, process-wide registry of database providers.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: BTreeMap<ProviderId, RegistryEntry>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the `postgresql` and `sqlserver`
    /// providers, both rendering `model`.
    #[must_use]
    pub fn with_builtin_providers(model: Arc<SchemaModel>) -> Self {
        let mut registry = Self::new();
        let postgres_model = Arc::clone(&model);
        registry.insert(
            PostgresDataProvider::builtin_descriptor(),
            Box::new(move || -> Arc<dyn DataProvider> {
                Arc::new(PostgresDataProvider::new(Arc::clone(&postgres_model)))
            }),
        );
        registry.insert(
            SqlServerDataProvider::builtin_descriptor(),
            Box::new(move || -> Arc<dyn DataProvider> {
                Arc::new(SqlServerDataProvider::new(Arc::clone(&model)))
            }),
        );
        registry
    }

    /// Registers a provider under `identifier`.
    ///
    /// The factory is not called here; it runs once, on first resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderRegistryError::InvalidIdentifier`] when the
    /// identifier fails validation,
    /// [`ProviderRegistryError::IdentifierMismatch`] when it differs from the
    /// descriptor's identifier, or
    /// [`ProviderRegistryError::DuplicateProvider`] when it is already taken.
    pub fn register<F, P>(
        &mut self,
        identifier: &str,
        descriptor: ProviderDescriptor,
        factory: F,
    ) -> ProviderRegistryResult<()>
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: DataProvider + 'static,
    {
        let provider_id = ProviderId::new(identifier)?;
        if provider_id != *descriptor.identifier() {
            return Err(ProviderRegistryError::IdentifierMismatch {
                identifier: provider_id,
                descriptor: descriptor.identifier().clone(),
            });
        }
        if self.entries.contains_key(&provider_id) {
            return Err(ProviderRegistryError::DuplicateProvider(provider_id));
        }

        self.insert(
            descriptor,
            Box::new(move || -> Arc<dyn DataProvider> { Arc::new(factory()) }),
        );
        Ok(())
    }

    /// Resolves the provider registered under `identifier`.
    ///
    /// Lookup ignores ASCII case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderRegistryError::UnknownProvider`] when nothing was
    /// registered under the identifier, or
    /// [`ProviderRegistryError::DescriptorMismatch`] when the factory builds
    /// a provider describing a different backend.
    pub fn resolve(&self, identifier: &str) -> ProviderRegistryResult<ProviderHandle> {
        let entry = ProviderId::new(identifier)
            .ok()
            .and_then(|provider_id| self.entries.get(&provider_id))
            .ok_or_else(|| ProviderRegistryError::UnknownProvider(identifier.to_owned()))?;

        let provider = Arc::clone(entry.instance.get_or_init(|| {
            tracing::debug!(provider = %entry.descriptor.identifier(), "instantiating data provider");
            (entry.factory)()
        }));

        if *provider.descriptor() != entry.descriptor {
            return Err(ProviderRegistryError::DescriptorMismatch(
                entry.descriptor.identifier().clone(),
            ));
        }
        Ok(ProviderHandle { provider })
    }

    /// Resolves the provider named by the host's data settings.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::resolve`].
    pub fn resolve_configured(&self, settings: &DataSettings) -> ProviderRegistryResult<ProviderHandle> {
        self.resolve(settings.data_provider())
    }

    /// Returns the registered descriptors in identifier order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.entries.values().map(|entry| &entry.descriptor)
    }

    /// Returns whether a provider is registered under `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        ProviderId::new(identifier).is_ok_and(|provider_id| self.entries.contains_key(&provider_id))
    }

    fn insert(&mut self, descriptor: ProviderDescriptor, factory: ProviderFactory) {
        tracing::debug!(provider = %descriptor.identifier(), "registering data provider");
        self.entries.insert(
            descriptor.identifier().clone(),
            RegistryEntry {
                descriptor,
                factory,
                instance: OnceLock::new(),
            },
        );
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.descriptors()).finish()
    }
}
