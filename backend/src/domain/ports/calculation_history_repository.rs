//! Port for the calculation history store.
//!
//! Two adapters implement [`CalculationHistoryRepository`]: a Diesel-backed
//! PostgreSQL table and a bounded in-process buffer. The process picks one at
//! startup and keeps it for its lifetime.

use async_trait::async_trait;

use crate::domain::{Calculation, NewCalculation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by history store adapters.
    pub enum HistoryRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "history repository connection failed: {message}",
        /// A statement failed during execution.
        Query { message: String } =>
            "history repository query failed: {message}",
    }
}

/// Append-only calculation log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculationHistoryRepository: Send + Sync {
    /// Store a calculation, assigning its identifier and timestamp.
    async fn append(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, HistoryRepositoryError>;

    /// Most recent calculations, newest first, at most `limit` entries.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Calculation>, HistoryRepositoryError>;

    /// Remove every stored calculation.
    async fn clear(&self) -> Result<(), HistoryRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_error_formats_message() {
        let error = HistoryRepositoryError::connection("refused");
        assert_eq!(
            error.to_string(),
            "history repository connection failed: refused"
        );
    }

    #[rstest]
    fn query_error_formats_message() {
        let error = HistoryRepositoryError::query("relation missing");
        assert!(error.to_string().contains("relation missing"));
    }
}
