use actix_web::{web, HttpResponse};

use crate::dto::RefreshRequestDto;
use crate::handlers::handle_status;

use ta_core::repositories::{RevocationIndex, SessionRepository, UserRepository};
use ta_core::services::auth::PasswordHasher;

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Re-signs the access token paired with the refresh token. The new access
/// token keeps the same `jti`, so earlier copies remain valid until they expire.
///
/// # Request Body
///
/// ```json
/// { "refresh_token": "eyJ..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Access token refreshed successfully",
///     "access_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired or logged-out refresh token
/// - 500 Internal Server Error: Cache or signing failure
pub async fn refresh<U, R, I, H>(
    state: web::Data<AppState<U, R, I, H>>,
    request: web::Json<RefreshRequestDto>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: SessionRepository + 'static,
    I: RevocationIndex + 'static,
    H: PasswordHasher,
{
    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(status) => handle_status(&status),
    }
}
