//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::future::Future;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use calculator_backend::Trace;
#[cfg(debug_assertions)]
use calculator_backend::doc::ApiDoc;
use calculator_backend::inbound::http::configure_api;
use calculator_backend::inbound::http::health::{HealthState, live, ready};
use calculator_backend::inbound::http::state::HttpState;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Resolve on Ctrl-C, or on `SIGTERM` where available.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Fail liveness probes, then wait for `stop` to finish in-flight requests.
async fn drain<F>(health_state: web::Data<HealthState>, stop: F)
where
    F: Future<Output = ()>,
{
    health_state.mark_unhealthy();
    info!("shutdown requested; draining connections");
    stop.await;
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Actix signal handling is disabled; a shutdown signal marks the process
/// unhealthy before the graceful stop begins.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr();
    let http_state = config.http_state;
    let backend = http_state.backend;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    let handle = server.handle();
    let drain_state = health_state.clone();
    actix_web::rt::spawn(async move {
        match shutdown_signal().await {
            Ok(()) => drain(drain_state, handle.stop(true)).await,
            Err(error) => warn!(%error, "shutdown signal listener unavailable"),
        }
    });

    info!(%bind_addr, history = backend.health_label(), "calculator backend listening");
    health_state.mark_ready();
    Ok(server)
}
