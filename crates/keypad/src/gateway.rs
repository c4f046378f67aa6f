//! Boundary between the keypad and the calculator backend.
//!
//! [`HttpCalculatorGateway`] owns transport details only: endpoint
//! resolution, JSON encoding, status mapping and decoding. Error bodies from
//! the backend are read when they parse and ignored when they do not.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A successful calculation as returned by `POST /api/calculate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Evaluation {
    /// Expression exactly as submitted.
    pub expression: String,
    /// Rendered result.
    pub result: String,
}

/// One record from `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    /// Store-assigned identifier.
    pub id: i64,
    /// Expression as submitted.
    pub expression: String,
    /// Rendered result.
    pub result: String,
    /// When the backend stored the record.
    pub created_at: DateTime<Utc>,
}

/// Why a gateway call failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The backend answered with a non-success status.
    #[error("backend rejected request with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The backend's `error` message, or a body preview.
        message: String,
    },
    /// The request never produced a response.
    #[error("transport failure: {message}")]
    Transport {
        /// Underlying client error.
        message: String,
    },
    /// A success response did not match the expected shape.
    #[error("undecodable response: {message}")]
    Decode {
        /// Underlying decode error.
        message: String,
    },
}

/// Calculator operations the keypad depends on.
#[async_trait]
pub trait CalculatorGateway: Send + Sync {
    /// Evaluate `expression` and record it in history.
    async fn calculate(&self, expression: &str) -> Result<Evaluation, GatewayError>;

    /// Most recent calculations, newest first.
    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError>;

    /// Delete every stored calculation.
    async fn clear_history(&self) -> Result<(), GatewayError>;
}

#[derive(Serialize)]
struct CalculateBody<'a> {
    expression: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Gateway performing HTTP requests against one backend origin.
#[derive(Debug, Clone)]
pub struct HttpCalculatorGateway {
    client: Client,
    base: Url,
}

impl HttpCalculatorGateway {
    /// Build a gateway for `base` with a per-request timeout.
    ///
    /// `base` may carry a path prefix; API paths are resolved beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    /// Origin the gateway talks to.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base.join(path).map_err(|error| GatewayError::Transport {
            message: format!("invalid endpoint {path}: {error}"),
        })
    }
}

#[async_trait]
impl CalculatorGateway for HttpCalculatorGateway {
    async fn calculate(&self, expression: &str) -> Result<Evaluation, GatewayError> {
        let response = self
            .client
            .post(self.endpoint("api/calculate")?)
            .json(&CalculateBody { expression })
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, GatewayError> {
        let response = self
            .client
            .get(self.endpoint("api/history")?)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(response).await
    }

    async fn clear_history(&self) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.endpoint("api/history")?)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, &body))
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, &body));
    }
    serde_json::from_slice(&body).map_err(|error| GatewayError::Decode {
        message: error.to_string(),
    })
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        message: error.to_string(),
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let message = serde_json::from_slice::<ErrorBody>(body).map_or_else(
        |_| {
            let preview = body_preview(body);
            if preview.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_owned()
            } else {
                preview
            }
        },
        |parsed| parsed.error,
    );
    GatewayError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
