//! HTTP inbound adapter exposing the calculator REST endpoints.
//!
//! ```text
//! GET    /api/health
//! POST   /api/calculate {"expression":"2+2"}
//! GET    /api/history
//! DELETE /api/history
//! ```

pub mod calculator;
pub mod error;
pub mod health;
pub mod history;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::{ApiResult, INVALID_JSON_BODY, json_config};

/// Register the `/api` routes and JSON extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use calculator_backend::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::api_health)
        .service(calculator::calculate)
        .service(history::list_history)
        .service(history::clear_history);
}
