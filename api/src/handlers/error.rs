use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use crate::dto::ErrorResponse;
use ta_core::services::auth::{Code, Status};

/// Convert a facade status into the matching HTTP response
pub fn handle_status(status: &Status) -> HttpResponse {
    match status.code {
        Code::Internal | Code::DeadlineExceeded => {
            tracing::error!(code = ?status.code, "Request failed: {}", status.message)
        }
        _ => tracing::debug!(code = ?status.code, "Request rejected: {}", status.message),
    }

    ErrorResponse::from(status).to_response()
}

/// 400 naming every field that failed validation
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|f| f.to_string()).collect();
    fields.sort_unstable();

    handle_status(&Status::invalid_argument(format!(
        "Invalid request body: {}",
        fields.join(", ")
    )))
}

/// Error handler for `web::JsonConfig` so malformed bodies get the same
/// JSON shape as every other failure
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("Rejected request body: {}", err);
    let response = handle_status(&Status::invalid_argument("Invalid request body"));
    InternalError::from_response(err, response).into()
}
