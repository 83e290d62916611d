//! SQL Server data provider.

use crate::provider::{
    adapters::render::{Dialect, render_create_script},
    domain::{
        ColumnDefinition, ColumnType, ParameterStyle, ProviderDescriptor, ProviderId,
        SchemaModel, SchemaProbe,
    },
    ports::{ConnectionResult, DataProvider, SchemaConnection, ScriptGenerationError},
};
use std::sync::Arc;

/// Registry identifier of the SQL Server provider.
pub const SQLSERVER_PROVIDER_ID: &str = "sqlserver";

/// Largest input `HASHBYTES` accepts, in bytes.
const HASHBYTES_MAX_LENGTH: u32 = 8000;

/// Lists base tables of the current database only.
pub const INTROSPECTION_QUERY: &str = concat!(
    "SELECT TABLE_NAME AS value FROM INFORMATION_SCHEMA.TABLES ",
    "WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_CATALOG = DB_NAME()",
);

/// SQL Server implementation of the provider contract.
#[derive(Debug, Clone)]
pub struct SqlServerDataProvider {
    descriptor: ProviderDescriptor,
    model: Arc<SchemaModel>,
}

impl SqlServerDataProvider {
    /// Creates a provider that renders `model` in the T-SQL dialect.
    #[must_use]
    pub fn new(model: Arc<SchemaModel>) -> Self {
        Self {
            descriptor: Self::builtin_descriptor(),
            model,
        }
    }

    /// Returns the descriptor registered for this provider.
    #[must_use]
    pub fn builtin_descriptor() -> ProviderDescriptor {
        ProviderDescriptor::new(
            ProviderId::from_static(SQLSERVER_PROVIDER_ID),
            true,
            HASHBYTES_MAX_LENGTH,
        )
    }
}

impl DataProvider for SqlServerDataProvider {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    fn probe_schema(&self, connection: &mut dyn SchemaConnection) -> ConnectionResult<SchemaProbe> {
        connection
            .query_column(INTROSPECTION_QUERY)
            .map(SchemaProbe::new)
    }

    fn generate_create_script(&self) -> Result<String, ScriptGenerationError> {
        render_create_script(&SqlServerDialect, self.descriptor.identifier(), &self.model)
    }

    fn parameter_style(&self) -> ParameterStyle {
        ParameterStyle::AtP
    }
}

struct SqlServerDialect;

impl Dialect for SqlServerDialect {
    fn quote(&self, identifier: &str) -> String {
        format!("[{}]", identifier.replace(']', "]]"))
    }

    fn column_type(&self, column: &ColumnDefinition) -> String {
        let base = match column.column_type() {
            ColumnType::Int32 => "int".to_owned(),
            ColumnType::Int64 => "bigint".to_owned(),
            ColumnType::Boolean => "bit".to_owned(),
            ColumnType::Decimal { precision, scale } => format!("decimal({precision}, {scale})"),
            ColumnType::Text {
                max_length: Some(length),
            } => format!("nvarchar({length})"),
            ColumnType::Text { max_length: None } => "nvarchar(max)".to_owned(),
            ColumnType::DateTime => "datetime2".to_owned(),
            ColumnType::Guid => "uniqueidentifier".to_owned(),
            ColumnType::Binary => "varbinary(max)".to_owned(),
        };
        if column.is_identity() {
            format!("{base} IDENTITY(1,1)")
        } else {
            base
        }
    }
}
