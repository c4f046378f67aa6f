//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the [`ErrorSchema`] and [`ErrorCodeSchema`] wrappers, so domain types
//! stay free of utoipa derives.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculator backend API",
        description = "Expression evaluation with a bounded calculation history.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::calculator::calculate,
        crate::inbound::http::history::list_history,
        crate::inbound::http::history::clear_history,
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "calculator", description = "Expression evaluation"),
        (name = "history", description = "Recent calculations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
