//! Calculation history records.

use std::fmt;

use chrono::{DateTime, Utc};

/// Number of records returned by history reads and kept by the volatile store.
pub const HISTORY_LIMIT: usize = 50;

/// Identifier assigned by a history store.
///
/// Identifiers are unique and strictly increasing within one store's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalculationId(i64);

impl CalculationId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable record of one successful calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calculation {
    /// Store-assigned identifier.
    pub id: CalculationId,
    /// Expression as submitted.
    pub expression: String,
    /// Rendered result.
    pub result: String,
    /// When the store accepted the record.
    pub created_at: DateTime<Utc>,
}

/// Calculation awaiting an identifier and timestamp from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalculation {
    /// Expression as submitted.
    pub expression: String,
    /// Rendered result.
    pub result: String,
}

impl NewCalculation {
    /// Build a pending record.
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

/// Which history store the process selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryBackendKind {
    /// PostgreSQL-backed history.
    Durable,
    /// Process-memory history capped at [`HISTORY_LIMIT`] records.
    Volatile,
}

impl HistoryBackendKind {
    /// Label reported by the health endpoint.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::HistoryBackendKind;
    ///
    /// assert_eq!(HistoryBackendKind::Durable.health_label(), "connected");
    /// assert_eq!(HistoryBackendKind::Volatile.health_label(), "in-memory");
    /// ```
    #[must_use]
    pub const fn health_label(self) -> &'static str {
        match self {
            Self::Durable => "connected",
            Self::Volatile => "in-memory",
        }
    }
}
