//! One-time history backend selection.
//!
//! The server asks for a durable store when `DATABASE_URL` names a usable
//! PostgreSQL database. Migrations and pool construction must both succeed;
//! otherwise the process keeps volatile history until it exits.

use std::num::NonZeroU32;
use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::HistoryBackendKind;
use crate::domain::ports::CalculationHistoryRepository;
use crate::outbound::memory::InMemoryHistoryRepository;
use crate::outbound::persistence::{
    DbPool, DieselCalculationHistoryRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations_async,
};
use crate::settings::{DatabaseTarget, DatabaseUrl, ServerSettings};

/// Why the durable backend could not be initialised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DurableStartupError {
    /// Schema migrations failed.
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// History store chosen for the lifetime of the process.
#[derive(Clone)]
pub struct HistoryBackend {
    kind: HistoryBackendKind,
    repository: Arc<dyn CalculationHistoryRepository>,
}

impl HistoryBackend {
    /// Volatile history with timestamps from `clock`.
    pub fn volatile(clock: Arc<dyn Clock>) -> Self {
        Self {
            kind: HistoryBackendKind::Volatile,
            repository: Arc::new(InMemoryHistoryRepository::new(clock)),
        }
    }

    /// Durable history over an initialised pool.
    pub fn durable(pool: DbPool) -> Self {
        Self {
            kind: HistoryBackendKind::Durable,
            repository: Arc::new(DieselCalculationHistoryRepository::new(pool)),
        }
    }

    /// Which variant was selected.
    pub fn kind(&self) -> HistoryBackendKind {
        self.kind
    }

    /// Shared handle to the selected store.
    pub fn repository(&self) -> Arc<dyn CalculationHistoryRepository> {
        Arc::clone(&self.repository)
    }
}

/// Pick the history backend for this process. Never fails.
pub async fn select_history_backend(
    settings: &ServerSettings,
    clock: Arc<dyn Clock>,
) -> HistoryBackend {
    let url = match &settings.database {
        DatabaseTarget::Unset => {
            info!("DATABASE_URL not configured; using in-memory history");
            return HistoryBackend::volatile(clock);
        }
        DatabaseTarget::Placeholder => {
            info!("DATABASE_URL holds placeholder credentials; using in-memory history");
            return HistoryBackend::volatile(clock);
        }
        DatabaseTarget::Invalid(error) => {
            warn!(%error, "DATABASE_URL rejected; using in-memory history");
            return HistoryBackend::volatile(clock);
        }
        DatabaseTarget::Postgres(url) => url,
    };

    match connect_durable(url, settings.pool_max_size).await {
        Ok(pool) => {
            info!(database = %url, "using PostgreSQL history");
            HistoryBackend::durable(pool)
        }
        Err(error) => {
            warn!(
                %error,
                database = %url,
                "PostgreSQL history unavailable; using in-memory history"
            );
            HistoryBackend::volatile(clock)
        }
    }
}

/// Apply migrations and build a pool for `url`.
///
/// # Errors
///
/// Returns [`DurableStartupError`] when either step fails.
pub async fn connect_durable(
    url: &DatabaseUrl,
    pool_max_size: NonZeroU32,
) -> Result<DbPool, DurableStartupError> {
    let applied = run_pending_migrations_async(url.as_str().to_owned()).await?;
    debug!(applied, "history schema up to date");

    let config = PoolConfig::new(url.as_str()).with_max_size(pool_max_size.get());
    Ok(DbPool::new(config).await?)
}
