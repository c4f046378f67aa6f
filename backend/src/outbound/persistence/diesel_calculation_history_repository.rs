//! PostgreSQL-backed `CalculationHistoryRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CalculationHistoryRepository, HistoryRepositoryError};
use crate::domain::{Calculation, NewCalculation};

use super::models::{CalculationRow, NewCalculationRow};
use super::pool::{DbPool, PoolError};
use super::schema::calculations;

/// Durable history store over the `calculations` table.
///
/// The table is unbounded; reads return the newest rows first, ordered by
/// `created_at` and then `id` so rows sharing a timestamp keep insertion order.
#[derive(Clone)]
pub struct DieselCalculationHistoryRepository {
    pool: DbPool,
}

impl DieselCalculationHistoryRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HistoryRepositoryError {
    HistoryRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> HistoryRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => HistoryRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => HistoryRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            HistoryRepositoryError::connection("database connection error")
        }
        _ => HistoryRepositoryError::query("database error"),
    }
}

#[async_trait]
impl CalculationHistoryRepository for DieselCalculationHistoryRepository {
    async fn append(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewCalculationRow {
            expression: calculation.expression.as_str(),
            result: calculation.result.as_str(),
        };
        let stored: CalculationRow = diesel::insert_into(calculations::table)
            .values(&row)
            .returning(CalculationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(stored.into())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Calculation>, HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows: Vec<CalculationRow> = calculations::table
            .select(CalculationRow::as_select())
            .order_by((calculations::created_at.desc(), calculations::id.desc()))
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Calculation::from).collect())
    }

    async fn clear(&self) -> Result<(), HistoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(calculations::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(removed, "calculation history cleared");
        Ok(())
    }
}
