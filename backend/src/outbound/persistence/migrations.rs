//! Embedded schema migrations.
//!
//! `diesel_migrations` only drives synchronous connections, so the async
//! entry point hands the work to the blocking thread pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// No connection could be opened.
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking task panicked or was cancelled.
    #[error("migration task did not complete: {message}")]
    Task { message: String },
}

/// Apply pending migrations to `database_url`, returning how many ran.
///
/// # Errors
///
/// Returns [`MigrationError::Connect`] when the database is unreachable and
/// [`MigrationError::Apply`] when a migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(applied.len())
}

/// Async wrapper around [`run_pending_migrations`].
///
/// # Errors
///
/// As [`run_pending_migrations`], plus [`MigrationError::Task`] when the
/// blocking task fails to finish.
pub async fn run_pending_migrations_async(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}
