use actix_web::HttpResponse;

use crate::dto::MeResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Requires `Authorization: Bearer {access_token}`.
pub async fn me(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        success: true,
        user_id: auth.user_id.to_string(),
    })
}
