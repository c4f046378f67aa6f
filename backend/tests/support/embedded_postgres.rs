//! Shared embedded PostgreSQL helpers for integration tests.
//!
//! Every suite shares one cluster per test binary and gets a fresh temporary
//! database with the backend's embedded migrations applied.

use std::time::Duration;

use calculator_backend::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::{BootstrapResult, ClusterHandle, TemporaryDatabase};

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns the process-wide cluster handle, retrying transient bootstrap
/// failures.
///
/// # Examples
///
/// ```rust,ignore
/// let cluster = shared_cluster_handle().expect("embedded postgres cluster");
/// let temp_db = cluster.create_temporary_database().expect("temporary database");
/// println!("connection URL: {}", temp_db.url());
/// ```
pub fn shared_cluster_handle() -> BootstrapResult<&'static ClusterHandle> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) => {
                if attempt >= SHARED_CLUSTER_RETRIES {
                    return Err(error);
                }
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Keep `PG_PASSWORD` stable across processes reusing one data directory.
///
/// A data directory initialised under one random password rejects the next
/// process's random password with `28P01`.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns threads, and the
        // shared handle initialises at most once per process.
        unsafe {
            std::env::set_var("PG_PASSWORD", "calculator_embedded_test");
        }
    }
}

/// Create a temporary database on the shared cluster and migrate it.
///
/// # Errors
///
/// Returns a rendered message when the cluster, database or migrations fail.
pub fn provision_migrated_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|error| error.to_string())?;
    let database = cluster
        .create_temporary_database()
        .map_err(|error| format!("create temporary database: {error:?}"))?;
    run_pending_migrations(database.url()).map_err(|error| error.to_string())?;
    Ok(database)
}
