//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on domain ports,
//! so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::HistoryBackendKind;
use crate::domain::ports::{CalculatorCommand, HistoryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Evaluates expressions and clears history.
    pub calculator: Arc<dyn CalculatorCommand>,
    /// Reads recent history.
    pub history: Arc<dyn HistoryQuery>,
    /// History store chosen at startup.
    pub backend: HistoryBackendKind,
}

impl HttpState {
    /// Bundle the ports with the selected backend kind.
    pub fn new(
        calculator: Arc<dyn CalculatorCommand>,
        history: Arc<dyn HistoryQuery>,
        backend: HistoryBackendKind,
    ) -> Self {
        Self {
            calculator,
            history,
            backend,
        }
    }
}
