//! Embedded PostgreSQL for adapter integration tests.
//!
//! Each test gets its own temporary database on a cluster shared by the test
//! binary, migrated with the same embedded migrations the server runs at
//! startup. Set `SKIP_TEST_CLUSTER=1` where PostgreSQL binaries cannot be
//! fetched or started; the tests then report a skip instead of failing.

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use tokio::runtime::Runtime;

use contact_manager::outbound::persistence::run_pending_migrations;

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    shared_cluster_handle().map_err(|err| format!("start embedded cluster: {err:?}"))
}

fn skip_requested() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Report a cluster setup failure, panicking unless skipping was requested.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if skip_requested() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create an empty database and bring it to the latest schema.
///
/// Must be called outside any Tokio runtime; `runtime` drives the async
/// migration runner.
pub fn migrated_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let database = shared_cluster()?
        .create_temporary_database()
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    let applied = runtime
        .block_on(run_pending_migrations(database.url()))
        .map_err(|err| err.to_string())?;
    if applied == 0 {
        return Err("no migrations were applied to a fresh database".to_owned());
    }
    Ok(database)
}
