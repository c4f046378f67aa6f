//! Calculation endpoint.
//!
//! ```text
//! POST /api/calculate {"expression":"2+2"}  ->  {"expression":"2+2","result":"4"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Evaluation;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/calculate`.
///
/// A missing or `null` expression reaches the evaluator as absent and is
/// reported as "Expression is required".
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CalculateRequest {
    /// Infix arithmetic over `0-9 + - * / . ( )` and spaces.
    #[serde(default)]
    #[schema(example = "(2+3)*4", max_length = 255)]
    pub expression: Option<String>,
}

/// Successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CalculateResponse {
    /// Expression exactly as submitted.
    #[schema(example = "(2+3)*4")]
    pub expression: String,
    /// Rendered result.
    #[schema(example = "20")]
    pub result: String,
}

impl From<Evaluation> for CalculateResponse {
    fn from(value: Evaluation) -> Self {
        Self {
            expression: value.expression,
            result: value.result,
        }
    }
}

/// Evaluate an expression and record it in history.
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Evaluation result", body = CalculateResponse),
        (status = 400, description = "Invalid expression", body = ErrorSchema),
        (status = 500, description = "History store failure", body = ErrorSchema)
    ),
    tags = ["calculator"],
    operation_id = "calculate"
)]
#[post("/calculate")]
pub async fn calculate(
    state: web::Data<HttpState>,
    payload: web::Json<CalculateRequest>,
) -> ApiResult<web::Json<CalculateResponse>> {
    let CalculateRequest { expression } = payload.into_inner();
    let evaluation = state.calculator.calculate(expression).await?;
    Ok(web::Json(CalculateResponse::from(evaluation)))
}
