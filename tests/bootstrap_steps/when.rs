//! When steps for schema bootstrap BDD scenarios.

use super::world::BootstrapWorld;
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use std::sync::Arc;
use storehouse::bootstrap::services::initialize_database;

fn initialize(world: &mut BootstrapWorld) -> Result<(), eyre::Report> {
    let settings = world
        .settings
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no provider configured in scenario world"))?;
    let result = initialize_database(
        &world.registry,
        settings,
        &mut world.connection,
        &world.scripts,
        Arc::new(DefaultClock),
    );
    world.results.push(result);
    Ok(())
}

#[when("the database is initialized")]
fn the_database_is_initialized(world: &mut BootstrapWorld) -> Result<(), eyre::Report> {
    initialize(world)
}

#[when("the database is initialized again")]
fn the_database_is_initialized_again(world: &mut BootstrapWorld) -> Result<(), eyre::Report> {
    initialize(world)
}
