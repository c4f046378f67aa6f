//! Backend entry-point: selects the history store, then serves the REST API
//! and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use calculator_backend::domain::CalculatorService;
use calculator_backend::inbound::http::health::HealthState;
use calculator_backend::inbound::http::state::HttpState;
use calculator_backend::settings::ServerSettings;
use calculator_backend::startup::select_history_backend;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    let backend = select_history_backend(&settings, Arc::new(DefaultClock)).await;
    let service = Arc::new(CalculatorService::new(backend.repository()));
    let http_state = HttpState::new(service.clone(), service, backend.kind());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(settings.bind_addr, http_state),
    )?;
    server.await
}
