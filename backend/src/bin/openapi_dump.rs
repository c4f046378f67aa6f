//! Print the OpenAPI document as JSON.

use std::io::Write;
use std::process::ExitCode;

use calculator_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    let json = match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => json,
        Err(error) => {
            let _ = writeln!(std::io::stderr().lock(), "failed to render OpenAPI: {error}");
            return ExitCode::FAILURE;
        }
    };
    match writeln!(std::io::stdout().lock(), "{json}") {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
