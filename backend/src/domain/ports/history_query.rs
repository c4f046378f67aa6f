//! Driving port for reading calculation history.

use async_trait::async_trait;

use crate::domain::{Calculation, Error};

/// Read-side history use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryQuery: Send + Sync {
    /// Most recent calculations, newest first.
    async fn recent_history(&self) -> Result<Vec<Calculation>, Error>;
}
