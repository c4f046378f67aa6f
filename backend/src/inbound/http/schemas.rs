//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape so the framework concern stays in the inbound adapter.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message returned to clients.
    #[schema(example = "Invalid characters in expression")]
    error: String,
    /// Stable machine-readable error code.
    code: ErrorCodeSchema,
    /// Correlation identifier for this request.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details for client errors.
    details: Option<serde_json::Value>,
}
