//! Driving port for calculator mutations.
//!
//! HTTP handlers call this port to evaluate expressions and clear history
//! without knowing which history store is active.

use async_trait::async_trait;

use crate::domain::{Error, Evaluation};

/// Use-cases that change calculator state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalculatorCommand: Send + Sync {
    /// Evaluate `expression` and record it on success.
    async fn calculate(&self, expression: Option<String>) -> Result<Evaluation, Error>;

    /// Delete the whole history.
    async fn clear_history(&self) -> Result<(), Error>;
}
