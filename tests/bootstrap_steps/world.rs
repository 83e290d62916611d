//! Shared world state for schema bootstrap BDD scenarios.

use std::sync::Arc;

use camino::Utf8Path;
use rstest::fixture;
use storehouse::{
    bootstrap::{adapters::filesystem::DirScriptSource, domain::BootstrapOutcome, services::InitializeError},
    config::{DataSettings, load_schema_model},
    provider::{adapters::memory::RecordingConnection, services::ProviderRegistry},
};

const SCHEMA_MODEL_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/storefront_schema.json"
);
const SCRIPTS_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/install");

/// Scenario world for schema bootstrap behaviour tests.
pub struct BootstrapWorld {
    /// Registry holding the built-in providers.
    pub registry: ProviderRegistry,
    /// Install scripts shipped with the fixtures.
    pub scripts: DirScriptSource,
    /// Host settings, set by a given step.
    pub settings: Option<DataSettings>,
    /// Simulated target database.
    pub connection: RecordingConnection,
    /// Results of every initialization run, in order.
    pub results: Vec<Result<BootstrapOutcome, InitializeError>>,
}

impl BootstrapWorld {
    /// Creates a world over the fixture schema and install scripts.
    ///
    /// # Panics
    ///
    /// Panics when the fixtures cannot be loaded.
    #[must_use]
    pub fn new() -> Self {
        let model = load_schema_model(Utf8Path::new(SCHEMA_MODEL_PATH))
            .expect("fixture schema model loads");
        let scripts =
            DirScriptSource::open(Utf8Path::new(SCRIPTS_ROOT)).expect("fixture scripts open");
        Self {
            registry: ProviderRegistry::with_builtin_providers(Arc::new(model)),
            scripts,
            settings: None,
            connection: RecordingConnection::new(),
            results: Vec::new(),
        }
    }

    /// Returns the result of the most recent run.
    ///
    /// # Errors
    ///
    /// Returns an error when no run happened yet.
    pub fn last_result(&self) -> Result<&Result<BootstrapOutcome, InitializeError>, eyre::Report> {
        self.results
            .last()
            .ok_or_else(|| eyre::eyre!("no initialization run in scenario world"))
    }
}

impl Default for BootstrapWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BootstrapWorld {
    BootstrapWorld::default()
}
