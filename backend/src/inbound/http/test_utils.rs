//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::HistoryBackendKind;
use crate::domain::ports::{MockCalculatorCommand, MockHistoryQuery};

use super::state::HttpState;

/// Wrap mock ports in handler state for a volatile-backed server.
pub fn mock_state(
    calculator: MockCalculatorCommand,
    history: MockHistoryQuery,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(calculator),
        Arc::new(history),
        HistoryBackendKind::Volatile,
    ))
}
