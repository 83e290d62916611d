//! `PostgreSQL` data provider.

use crate::provider::{
    adapters::render::{Dialect, render_create_script},
    domain::{
        ColumnDefinition, ColumnType, ParameterStyle, ProviderDescriptor, ProviderId,
        SchemaModel, SchemaProbe,
    },
    ports::{ConnectionResult, DataProvider, SchemaConnection, ScriptGenerationError},
};
use std::sync::Arc;

/// Registry identifier of the `PostgreSQL` provider.
pub const POSTGRES_PROVIDER_ID: &str = "postgresql";

/// Lists base tables of the current database only.
pub const INTROSPECTION_QUERY: &str = concat!(
    "SELECT table_name::text AS value FROM information_schema.tables ",
    "WHERE table_type = 'BASE TABLE' AND table_catalog = current_database()",
);

/// `PostgreSQL` implementation of the provider contract.
#[derive(Debug, Clone)]
pub struct PostgresDataProvider {
    descriptor: ProviderDescriptor,
    model: Arc<SchemaModel>,
}

impl PostgresDataProvider {
    /// Creates a provider that renders `model` in the `PostgreSQL` dialect.
    #[must_use]
    pub fn new(model: Arc<SchemaModel>) -> Self {
        Self {
            descriptor: Self::builtin_descriptor(),
            model,
        }
    }

    /// Returns the descriptor registered for this provider.
    ///
    /// Backups are supported; server-side binary hashing is not.
    #[must_use]
    pub fn builtin_descriptor() -> ProviderDescriptor {
        ProviderDescriptor::new(ProviderId::from_static(POSTGRES_PROVIDER_ID), true, 0)
    }
}

impl DataProvider for PostgresDataProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn probe_schema(&self, connection: &mut dyn SchemaConnection) -> ConnectionResult<SchemaProbe> {
        connection
            .query_column(INTROSPECTION_QUERY)
            .map(SchemaProbe::new)
    }

    fn generate_create_script(&self) -> Result<String, ScriptGenerationError> {
        render_create_script(&PostgresDialect, self.descriptor.identifier(), &self.model)
    }

    fn parameter_style(&self) -> ParameterStyle {
        ParameterStyle::Dollar
    }
}

struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn quote(&self, identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    fn column_type(&self, column: &ColumnDefinition) -> String {
        let base = match column.column_type() {
            ColumnType::Int32 => "integer".to_owned(),
            ColumnType::Int64 => "bigint".to_owned(),
            ColumnType::Boolean => "boolean".to_owned(),
            ColumnType::Decimal { precision, scale } => format!("numeric({precision}, {scale})"),
            ColumnType::Text {
                max_length: Some(length),
            } => format!("varchar({length})"),
            ColumnType::Text { max_length: None } => "text".to_owned(),
            ColumnType::DateTime => "timestamp".to_owned(),
            ColumnType::Guid => "uuid".to_owned(),
            ColumnType::Binary => "bytea".to_owned(),
        };
        if column.is_identity() {
            format!("{base} GENERATED BY DEFAULT AS IDENTITY")
        } else {
            base
        }
    }
}
