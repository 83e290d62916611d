//! Creates the storefront baseline schema on a `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! storehouse-bootstrap <settings-path>
//! ```
//!
//! The settings file names the provider, the connection string, the schema
//! model and the script root. `STOREHOUSE_DATA_PROVIDER` and `DATABASE_URL`
//! override the file. Logging follows `RUST_LOG` and defaults to
//! `storehouse=info`. The process exits non-zero when bootstrap fails.

use camino::{Utf8Path, Utf8PathBuf};
use mockable::DefaultClock;
use std::ffi::OsString;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use storehouse::bootstrap::{
    adapters::filesystem::DirScriptSource,
    domain::BootstrapOutcome,
    services::{InitializeError, initialize_database},
};
use storehouse::config::{DataSettings, SettingsError, load_schema_model};
use storehouse::provider::{
    adapters::postgres::{POSTGRES_PROVIDER_ID, PgSchemaConnection, bootstrap_pool},
    services::ProviderRegistry,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "storehouse=info";

#[derive(Debug, Error)]
enum CliError {
    #[error("usage: storehouse-bootstrap <settings-path>")]
    Usage,
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("provider '{0}' needs a host-supplied connection")]
    UnsupportedProvider(String),
    #[error("failed to connect: {0}")]
    Connect(#[from] diesel::r2d2::PoolError),
    #[error("failed to open script root {path}: {source}")]
    ScriptRoot {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Initialize(#[from] InitializeError),
}

fn main() -> ExitCode {
    init_tracing();
    match run(std::env::args_os().skip(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "bootstrap failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn run(args: impl Iterator<Item = OsString>) -> Result<(), CliError> {
    let settings_path = parse_args(args)?;
    let settings = DataSettings::load(&settings_path)?;
    let model_path = settings
        .schema_model_path()
        .ok_or_else(|| SettingsError::Missing("schema_model_path"))?;
    let registry = ProviderRegistry::with_builtin_providers(Arc::new(load_schema_model(
        &model_path,
    )?));

    let provider = registry
        .resolve_configured(&settings)
        .map_err(InitializeError::from)?;
    let provider_id = provider.descriptor().identifier();
    if provider_id.as_str() != POSTGRES_PROVIDER_ID {
        return Err(CliError::UnsupportedProvider(provider_id.to_string()));
    }

    let database_url = settings
        .connection_string()
        .ok_or_else(|| SettingsError::Missing("connection_string"))?;
    let pool = bootstrap_pool(database_url)?;
    let mut pooled = pool.get()?;
    let mut connection = PgSchemaConnection::new(&mut pooled);
    let scripts = open_scripts(&settings.scripts_root())?;

    let outcome = initialize_database(
        &registry,
        &settings,
        &mut connection,
        &scripts,
        Arc::new(DefaultClock),
    )?;
    match outcome {
        BootstrapOutcome::AlreadyInitialized { matched } => {
            tracing::info!(matched = ?matched, "database already initialized");
        }
        BootstrapOutcome::Created(report) => {
            tracing::info!(
                run_id = %report.run_id(),
                commands = report.commands_executed(),
                "baseline schema created"
            );
        }
    }
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<Utf8PathBuf, CliError> {
    match (args.next(), args.next()) {
        (Some(path), None) => {
            Utf8PathBuf::from_path_buf(PathBuf::from(path)).map_err(|_| CliError::Usage)
        }
        _ => Err(CliError::Usage),
    }
}

fn open_scripts(root: &Utf8Path) -> Result<DirScriptSource, CliError> {
    DirScriptSource::open(root).map_err(|source| CliError::ScriptRoot {
        path: root.to_owned(),
        source,
    })
}
