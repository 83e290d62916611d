//! Then steps for schema bootstrap BDD scenarios.

use super::world::BootstrapWorld;
use rstest_bdd_macros::then;
use storehouse::{
    bootstrap::{
        domain::BootstrapOutcome,
        services::{BootstrapError, InitializeError},
    },
    provider::services::ProviderRegistryError,
};

#[then("the schema is created")]
fn the_schema_is_created(world: &BootstrapWorld) -> Result<(), eyre::Report> {
    match world.last_result()? {
        Ok(BootstrapOutcome::Created(report)) if report.scripts().len() == 3 => Ok(()),
        other => Err(eyre::eyre!("expected the schema to be created, got {other:?}")),
    }
}

#[then(r#"the table "{table}" exists"#)]
fn the_table_exists(world: &BootstrapWorld, table: String) -> Result<(), eyre::Report> {
    if world.connection.tables().contains(&table) {
        return Ok(());
    }
    Err(eyre::eyre!(
        "expected table '{table}' in {:?}",
        world.connection.tables()
    ))
}

#[then("{count:usize} commands were executed")]
fn commands_were_executed(world: &BootstrapWorld, count: usize) -> Result<(), eyre::Report> {
    let executed = world.connection.executed().len();
    if executed != count {
        return Err(eyre::eyre!("expected {count} executed commands, found {executed}"));
    }
    Ok(())
}

#[then("the last run reports the schema as already initialized")]
fn already_initialized(world: &BootstrapWorld) -> Result<(), eyre::Report> {
    match world.last_result()? {
        Ok(BootstrapOutcome::AlreadyInitialized { matched }) if !matched.is_empty() => Ok(()),
        other => Err(eyre::eyre!("expected an initialized schema, got {other:?}")),
    }
}

#[then(r#"initialization fails in the "{script}" script at command {index:usize}"#)]
fn fails_in_script(
    world: &BootstrapWorld,
    script: String,
    index: usize,
) -> Result<(), eyre::Report> {
    match world.last_result()? {
        Err(InitializeError::Bootstrap(BootstrapError::CommandFailed {
            script: failed_script,
            index: failed_index,
            ..
        })) if failed_script.as_str() == script && *failed_index == index => Ok(()),
        other => Err(eyre::eyre!(
            "expected {script} command {index} to fail, got {other:?}"
        )),
    }
}

#[then(r#"initialization fails because provider "{name}" is unknown"#)]
fn fails_with_unknown_provider(world: &BootstrapWorld, name: String) -> Result<(), eyre::Report> {
    match world.last_result()? {
        Err(InitializeError::Registry(ProviderRegistryError::UnknownProvider(requested)))
            if *requested == name =>
        {
            Ok(())
        }
        other => Err(eyre::eyre!("expected unknown provider '{name}', got {other:?}")),
    }
}
