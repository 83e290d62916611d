//! Test doubles shared by bootstrap tests.

use crate::provider::{
    domain::{ParameterStyle, ProviderDescriptor, ProviderId, SchemaProbe},
    ports::{ConnectionResult, DataProvider, SchemaConnection, ScriptGenerationError},
};

/// Provider whose create script is fixed text.
pub(super) struct ScriptedProvider {
    descriptor: ProviderDescriptor,
    create_script: String,
}

impl ScriptedProvider {
    pub(super) fn new(create_script: &str) -> Self {
        Self {
            descriptor: ProviderDescriptor::new(
                ProviderId::new("scripted").expect("valid identifier"),
                false,
                0,
            ),
            create_script: create_script.to_owned(),
        }
    }
}

impl DataProvider for ScriptedProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn probe_schema(&self, connection: &mut dyn SchemaConnection) -> ConnectionResult<SchemaProbe> {
        connection
            .query_column("SELECT table_name AS value FROM catalog")
            .map(SchemaProbe::new)
    }

    fn generate_create_script(&self) -> Result<String, ScriptGenerationError> {
        Ok(self.create_script.clone())
    }

    fn parameter_style(&self) -> ParameterStyle {
        ParameterStyle::Dollar
    }
}
