//! PostgreSQL persistence adapters using Diesel.
//!
//! Row structs (`models`) and table definitions (`schema`) stay private to
//! this module; repositories translate them into domain types. Connections
//! come from a `bb8` pool via `diesel-async`, opened over rustls when the
//! URL's `sslmode` asks for TLS.

mod diesel_calculation_history_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod tls;

pub use diesel_calculation_history_repository::DieselCalculationHistoryRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_async,
};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
