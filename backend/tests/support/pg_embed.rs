//! Embedded PostgreSQL bootstrap for the Diesel adapter suites.
//!
//! Each call provisions a fresh database on the shared
//! `pg-embed-setup-unpriv` cluster and applies the embedded migrations.
//! When the cluster cannot start, the calling test is skipped with a
//! `SKIP-TEST-CLUSTER` marker unless `REQUIRE_TEST_CLUSTER` is truthy.

use std::fmt::Display;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use uuid::Uuid;

use diet_backend::outbound::persistence::run_migrations;

/// Returns true when `REQUIRE_TEST_CLUSTER` is "1", "true" or "yes".
fn cluster_required() -> bool {
    std::env::var("REQUIRE_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn handle_cluster_setup_failure<T>(reason: impl Display) -> Option<T> {
    if cluster_required() {
        panic!("Test cluster setup failed: {reason}");
    }
    eprintln!("SKIP-TEST-CLUSTER: {reason}");
    None
}

/// Create a migrated database and return its connection URL.
///
/// Must be called outside any async runtime; the cluster bootstrap drives
/// its own.
pub fn migrated_database_url() -> Option<String> {
    let cluster = match shared_cluster_handle() {
        Ok(cluster) => cluster,
        Err(err) => return handle_cluster_setup_failure(format!("{err:?}")),
    };

    let name = format!("diet_test_{}", Uuid::new_v4().simple());
    if let Err(err) = cluster.create_database(name.as_str()) {
        return handle_cluster_setup_failure(format!("create database: {err:?}"));
    }
    let url = cluster.connection().database_url(&name);

    let migrated = actix_rt::System::new().block_on(run_migrations(&url));
    match migrated {
        Ok(()) => Some(url.to_string()),
        Err(err) => handle_cluster_setup_failure(format!("migrations: {err}")),
    }
}
