//! Domain types, use-cases and ports.
//!
//! Public surface:
//! - [`expression`]: tokeniser, parser and evaluator for calculator input.
//! - [`Calculation`], [`NewCalculation`], [`CalculationId`]: history records.
//! - [`CalculatorService`]: driving-port implementation over a history store.
//! - [`Error`], [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.

mod calculation;
mod calculator_service;
pub mod error;
pub mod expression;
pub mod ports;
mod trace_id;

pub use self::calculation::{
    Calculation, CalculationId, HISTORY_LIMIT, HistoryBackendKind, NewCalculation,
};
pub use self::calculator_service::{
    CLEAR_HISTORY_FAILED, CalculatorService, FETCH_HISTORY_FAILED, SAVE_CALCULATION_FAILED,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::expression::{Evaluation, EvaluationError};
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
