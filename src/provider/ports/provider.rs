//! Capability contract implemented by every database provider.

use super::connection::{ConnectionResult, SchemaConnection};
use crate::provider::domain::{AuxiliaryScripts, ParameterStyle, ProviderDescriptor, SchemaProbe};
use thiserror::Error;

/// Backend-specific persistence behaviour behind a fixed contract.
///
/// One implementation exists per supported backend. The active one is
/// chosen through the provider registry, never by inspecting types.
pub trait DataProvider: Send + Sync {
    /// Returns the provider's capability descriptor.
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Lists the base tables of the connection's own catalog.
    ///
    /// The query never reaches into other catalogs.
    ///
    /// # Errors
    ///
    /// Returns the connection error when the introspection query fails.
    fn probe_schema(&self, connection: &mut dyn SchemaConnection) -> ConnectionResult<SchemaProbe>;

    /// Renders the full baseline create script in this backend's dialect.
    ///
    /// The script is batch-delimited: tables come first, then foreign keys,
    /// so later batches may depend on earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptGenerationError`] when rendering fails.
    fn generate_create_script(&self) -> Result<String, ScriptGenerationError>;

    /// Returns the placeholder style used to build command parameters.
    fn parameter_style(&self) -> ParameterStyle;

    /// Returns the default locations of the index and stored routine scripts.
    fn auxiliary_scripts(&self) -> AuxiliaryScripts {
        AuxiliaryScripts::for_provider(self.descriptor().identifier())
    }
}

/// Errors raised while generating a create script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptGenerationError {
    /// The schema model holds no tables.
    #[error("schema model for provider '{0}' has no tables")]
    EmptyModel(String),

    /// The dialect template failed to render.
    #[error("failed to render {provider} create script: {reason}")]
    TemplateRender {
        /// Provider whose template failed.
        provider: String,
        /// Renderer diagnostic.
        reason: String,
    },
}
