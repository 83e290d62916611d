//! Bootstrap runs against a real `PostgreSQL` database.

use super::helpers::{
    BoxError, PostgresCluster, bootstrapper, fixture_provider, fixture_scripts, postgres_cluster,
};
use rstest::rstest;
use storehouse::{
    bootstrap::{
        adapters::memory::InMemoryScriptSource,
        domain::{BootstrapOutcome, ScriptKind},
        services::BootstrapError,
    },
    provider::{
        adapters::postgres::{PgSchemaConnection, bootstrap_pool},
        ports::{DataProvider, SchemaConnection},
    },
};

#[rstest]
fn fresh_database_is_bootstrapped_once(postgres_cluster: PostgresCluster) -> Result<(), BoxError> {
    let database = postgres_cluster.temporary_database()?;
    let mut conn = database.connect()?;
    let mut connection = PgSchemaConnection::new(&mut conn);
    let provider = fixture_provider()?;
    let scripts = fixture_scripts()?;

    let first = bootstrapper().ensure_initialized(&mut connection, &provider, &scripts)?;
    let second = bootstrapper().ensure_initialized(&mut connection, &provider, &scripts)?;

    let BootstrapOutcome::Created(report) = first else {
        panic!("expected the first run to create the schema");
    };
    assert_eq!(report.commands_executed(), 14);
    assert_eq!(
        second,
        BootstrapOutcome::AlreadyInitialized {
            matched: vec![
                "Customer".to_owned(),
                "Discount".to_owned(),
                "Order".to_owned(),
                "Product".to_owned(),
                "ShoppingCartItem".to_owned(),
            ],
        }
    );
    Ok(())
}

#[rstest]
fn routines_and_indexes_are_usable(postgres_cluster: PostgresCluster) -> Result<(), BoxError> {
    let database = postgres_cluster.temporary_database()?;
    let mut conn = database.connect()?;
    let mut connection = PgSchemaConnection::new(&mut conn);
    let provider = fixture_provider()?;

    bootstrapper().ensure_initialized(&mut connection, &provider, &fixture_scripts()?)?;

    let count = connection
        .query_column("SELECT \"CustomerCountByEmail\"('nobody@example.com')::text AS value")?;
    let indexes = connection.query_column(
        "SELECT indexname::text AS value FROM pg_indexes WHERE indexname = 'IX_Product_Published'",
    )?;
    assert_eq!(count, ["0"]);
    assert_eq!(indexes, ["IX_Product_Published"]);
    Ok(())
}

#[rstest]
fn views_do_not_count_as_signature_tables(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let database = postgres_cluster.temporary_database()?;
    let mut conn = database.connect()?;
    let mut connection = PgSchemaConnection::new(&mut conn);
    connection.execute("CREATE VIEW \"Customer\" AS SELECT 1 AS \"Id\"")?;
    let provider = fixture_provider()?;

    let probe = provider.probe_schema(&mut connection)?;

    assert!(probe.is_empty());
    Ok(())
}

#[rstest]
fn failing_index_keeps_created_tables(postgres_cluster: PostgresCluster) -> Result<(), BoxError> {
    let database = postgres_cluster.temporary_database()?;
    let mut conn = database.connect()?;
    let mut connection = PgSchemaConnection::new(&mut conn);
    let provider = fixture_provider()?;
    let scripts = InMemoryScriptSource::new()
        .with_script(
            "postgresql.indexes.sql",
            "CREATE INDEX \"IX_Missing\" ON \"NoSuchTable\" (\"Id\")",
        )
        .with_script("postgresql.storedprocedures.sql", "SELECT 1");

    let result = bootstrapper().ensure_initialized(&mut connection, &provider, &scripts);
    let probe = provider.probe_schema(&mut connection)?;

    assert!(matches!(
        result,
        Err(BootstrapError::CommandFailed {
            script: ScriptKind::Indexes,
            index: 0,
            ..
        })
    ));
    assert!(probe.contains_ignore_case("shoppingcartitem"));
    Ok(())
}

#[rstest]
fn advisory_lock_excludes_other_sessions(
    postgres_cluster: PostgresCluster,
) -> Result<(), BoxError> {
    let database = postgres_cluster.temporary_database()?;
    let mut holder_conn = database.connect()?;
    let mut holder = PgSchemaConnection::new(&mut holder_conn);
    let pool = bootstrap_pool(database.url())?;
    let mut pooled = pool.get()?;
    let mut other = PgSchemaConnection::new(&mut pooled);
    let try_lock = "SELECT pg_try_advisory_lock(4242)::text AS value";

    holder.acquire_bootstrap_lock(4242)?;
    let while_held = other.query_column(try_lock)?;
    holder.release_bootstrap_lock(4242)?;
    let after_release = other.query_column(try_lock)?;
    other.release_bootstrap_lock(4242)?;

    assert_eq!(while_held, ["false"]);
    assert_eq!(after_release, ["true"]);
    Ok(())
}
