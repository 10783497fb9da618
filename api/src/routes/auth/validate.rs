use actix_web::{web, HttpResponse};

use crate::dto::ValidateRequestDto;
use crate::handlers::handle_status;

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/validate
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "is_valid": true, "user_id": "42" }
/// ```
pub async fn validate<U, R, I, H>(
    state: web::Data<AppState<U, R, I, H>>,
    request: web::Json<ValidateRequestDto>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
    I: RevocationIndex + 'static,
    H: PasswordHasher,
{
    match state.auth_service.validate(&request.access_token).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(status) => handle_status(&status),
    }
}
