//! History endpoints.
//!
//! ```text
//! GET    /api/history  ->  [{"id":2,"expression":"2+2","result":"4","created_at":"..."}]
//! DELETE /api/history  ->  {"message":"History cleared"}
//! ```

use actix_web::{delete, get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Calculation;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Confirmation returned after clearing history.
pub const HISTORY_CLEARED: &str = "History cleared";

/// One history record as sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct HistoryEntry {
    /// Store-assigned identifier.
    #[schema(example = 42)]
    pub id: i64,
    /// Expression as submitted.
    #[schema(example = "6*7")]
    pub expression: String,
    /// Rendered result.
    #[schema(example = "42")]
    pub result: String,
    /// When the record was stored (RFC 3339, UTC).
    #[schema(value_type = String, format = DateTime, example = "2026-01-05T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl From<Calculation> for HistoryEntry {
    fn from(value: Calculation) -> Self {
        Self {
            id: value.id.get(),
            expression: value.expression,
            result: value.result,
            created_at: value.created_at,
        }
    }
}

/// Body of `DELETE /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ClearHistoryResponse {
    /// Always "History cleared".
    #[schema(example = "History cleared")]
    pub message: String,
}

/// Most recent calculations, newest first.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Up to 50 records, newest first", body = [HistoryEntry]),
        (status = 500, description = "History store failure", body = ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "listHistory"
)]
#[get("/history")]
pub async fn list_history(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<HistoryEntry>>> {
    let records = state.history.recent_history().await?;
    Ok(web::Json(records.into_iter().map(HistoryEntry::from).collect()))
}

/// Delete every stored calculation.
#[utoipa::path(
    delete,
    path = "/api/history",
    responses(
        (status = 200, description = "History cleared", body = ClearHistoryResponse),
        (status = 500, description = "History store failure", body = ErrorSchema)
    ),
    tags = ["history"],
    operation_id = "clearHistory"
)]
#[delete("/history")]
pub async fn clear_history(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ClearHistoryResponse>> {
    state.calculator.clear_history().await?;
    Ok(web::Json(ClearHistoryResponse {
        message: HISTORY_CLEARED.to_owned(),
    }))
}
