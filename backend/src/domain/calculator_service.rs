//! Calculator use-cases.
//!
//! [`CalculatorService`] implements the driving ports: it evaluates an
//! expression, appends successful results to the history store, and turns
//! store failures into generic internal errors after logging the cause.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::expression::{self, EvaluationError, SyntaxError};
use crate::domain::ports::{
    CalculationHistoryRepository, CalculatorCommand, HistoryQuery, HistoryRepositoryError,
};
use crate::domain::{Calculation, Error, Evaluation, HISTORY_LIMIT, NewCalculation};

/// Client-facing message when a history read fails.
pub const FETCH_HISTORY_FAILED: &str = "Failed to fetch history";
/// Client-facing message when clearing history fails.
pub const CLEAR_HISTORY_FAILED: &str = "Failed to clear history";
/// Client-facing message when a result cannot be recorded.
pub const SAVE_CALCULATION_FAILED: &str = "Failed to save calculation";

/// Calculator service over a history store.
///
/// `R` may be unsized, so the store chosen at startup can be held as
/// `Arc<dyn CalculationHistoryRepository>`.
pub struct CalculatorService<R: ?Sized> {
    history: Arc<R>,
}

impl<R: ?Sized> CalculatorService<R> {
    /// Create a service writing to `history`.
    pub const fn new(history: Arc<R>) -> Self {
        Self { history }
    }
}

impl<R: ?Sized> Clone for CalculatorService<R> {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
        }
    }
}

fn syntax_reason(error: SyntaxError) -> &'static str {
    match error {
        SyntaxError::UnexpectedEnd => "unexpected_end",
        SyntaxError::UnexpectedToken { .. } => "unexpected_token",
        SyntaxError::UnbalancedParenthesis { .. } => "unbalanced_parenthesis",
        SyntaxError::MalformedNumber { .. } => "malformed_number",
        SyntaxError::EmptyParentheses { .. } => "empty_parentheses",
    }
}

/// Map an evaluation failure to a client error with structured details.
pub(crate) fn map_evaluation_error(failure: &EvaluationError) -> Error {
    let error = Error::invalid_request(failure.to_string());
    match failure {
        EvaluationError::MissingExpression => {
            error.with_details(json!({ "field": "expression", "code": "missing_expression" }))
        }
        EvaluationError::InvalidCharacters { character, offset } => error.with_details(json!({
            "code": "invalid_characters",
            "character": character.to_string(),
            "offset": offset,
        })),
        EvaluationError::ExpressionTooLong { length, max } => error.with_details(json!({
            "code": "expression_too_long",
            "length": length,
            "max": max,
        })),
        EvaluationError::Syntax(syntax) => error.with_details(json!({
            "code": "syntax_error",
            "reason": syntax_reason(*syntax),
            "offset": syntax.offset(),
        })),
        EvaluationError::NonFiniteResult => {
            error.with_details(json!({ "code": "non_finite_result" }))
        }
    }
}

fn store_failure(failure: &HistoryRepositoryError, message: &'static str) -> Error {
    error!(error = %failure, outcome = message, "history store operation failed");
    Error::internal(message)
}

#[async_trait]
impl<R> CalculatorCommand for CalculatorService<R>
where
    R: CalculationHistoryRepository + ?Sized,
{
    async fn calculate(&self, expression: Option<String>) -> Result<Evaluation, Error> {
        let evaluation = expression::evaluate(expression.as_deref()).map_err(|failure| {
            debug!(error = %failure, "expression rejected");
            map_evaluation_error(&failure)
        })?;

        let record = self
            .history
            .append(&NewCalculation::new(
                evaluation.expression.as_str(),
                evaluation.result.as_str(),
            ))
            .await
            .map_err(|failure| store_failure(&failure, SAVE_CALCULATION_FAILED))?;
        debug!(id = %record.id, result = %record.result, "calculation recorded");

        Ok(evaluation)
    }

    async fn clear_history(&self) -> Result<(), Error> {
        self.history
            .clear()
            .await
            .map_err(|failure| store_failure(&failure, CLEAR_HISTORY_FAILED))
    }
}

#[async_trait]
impl<R> HistoryQuery for CalculatorService<R>
where
    R: CalculationHistoryRepository + ?Sized,
{
    async fn recent_history(&self) -> Result<Vec<Calculation>, Error> {
        self.history
            .list_recent(HISTORY_LIMIT)
            .await
            .map_err(|failure| store_failure(&failure, FETCH_HISTORY_FAILED))
    }
}

#[cfg(test)]
#[path = "calculator_service_tests.rs"]
mod tests;
