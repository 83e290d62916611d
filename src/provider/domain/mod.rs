//! Domain model for database providers.
//!
//! Provider descriptors, validated identifiers, the host-supplied schema
//! model and positional command parameters. All infrastructure concerns are
//! kept outside the domain boundary.

mod descriptor;
mod error;
mod ids;
mod parameter;
mod probe;
mod schema_model;
mod scripts;

pub use descriptor::ProviderDescriptor;
pub use error::ProviderDomainError;
pub use ids::ProviderId;
pub use parameter::{CommandParameter, ParameterStyle, ParameterValue};
pub use probe::SchemaProbe;
pub use schema_model::{ColumnDefinition, ColumnType, ForeignKey, SchemaModel, TableDefinition};
pub use scripts::AuxiliaryScripts;
