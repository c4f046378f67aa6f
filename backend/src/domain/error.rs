//! Domain-level error type.
//!
//! Errors are transport agnostic. The HTTP adapter maps [`ErrorCode`] to a
//! status and serialises the error as `{"error", "code", "traceId", "details"}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// An unexpected error occurred inside the service or its adapters.
    InternalError,
}

/// Error payload shared by the domain and its adapters.
///
/// The current [`TraceId`] is captured at construction time when one is in
/// scope, so errors raised inside a request carry its correlation id.
///
/// # Examples
/// ```
/// use calculator_backend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("Expression is required");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "Expression is required");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorBody", into = "ErrorBody")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Raised when a serialised error body cannot be turned back into an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The `error` field was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create an error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier, when the error was raised inside a request.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details for clients.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach or replace the trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use calculator_backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("Invalid characters in expression")
    ///     .with_details(json!({ "character": "a", "offset": 1 }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Copy of this error without details, for bodies that must not leak
    /// adapter internals.
    #[must_use]
    pub fn without_details(&self) -> Self {
        Self {
            details: None,
            ..self.clone()
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Wire shape of [`Error`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorBody {
    fn from(value: Error) -> Self {
        Self {
            error: value.message,
            code: value.code,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorBody> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorBody) -> Result<Self, Self::Error> {
        if value.error.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code: value.code,
            message: value.error,
            trace_id: value.trace_id,
            details: value.details,
        })
    }
}

#[cfg(test)]
mod tests;
