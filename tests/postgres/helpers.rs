//! Shared fixtures for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, TemporaryDatabase, postgres_cluster};
use camino::Utf8Path;
use mockable::DefaultClock;
use std::sync::Arc;
use storehouse::{
    bootstrap::{adapters::filesystem::DirScriptSource, services::SchemaBootstrapper},
    config::load_schema_model,
    provider::adapters::postgres::PostgresDataProvider,
};

const SCHEMA_MODEL_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/storefront_schema.json"
);
const SCRIPTS_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/install");

/// Builds the `PostgreSQL` provider over the fixture schema model.
///
/// # Errors
///
/// Returns an error when the fixture model cannot be loaded.
pub fn fixture_provider() -> Result<PostgresDataProvider, BoxError> {
    let model = load_schema_model(Utf8Path::new(SCHEMA_MODEL_PATH))?;
    Ok(PostgresDataProvider::new(Arc::new(model)))
}

/// Opens the fixture install scripts.
///
/// # Errors
///
/// Returns an error when the script directory cannot be opened.
pub fn fixture_scripts() -> Result<DirScriptSource, BoxError> {
    Ok(DirScriptSource::open(Utf8Path::new(SCRIPTS_ROOT))?)
}

/// Builds a bootstrapper using the wall clock.
#[must_use]
pub fn bootstrapper() -> SchemaBootstrapper<DefaultClock> {
    SchemaBootstrapper::new(Arc::new(DefaultClock))
}
