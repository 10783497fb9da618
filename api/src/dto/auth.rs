use serde::{Deserialize, Serialize};
use validator::Validate;

use ta_core::domain::value_objects::{LoginRequest, RegisterRequest};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequestDto {
    #[validate(email)]
    pub email: String,

    /// Letters and digits only
    #[validate(length(min = 4, max = 15), custom(function = "validate_alphanumeric"))]
    pub username: String,

    #[validate(length(min = 4, max = 30))]
    pub name: String,

    #[validate(length(min = 8, max = 100))]
    pub password: String,
}

impl From<RegisterRequestDto> for RegisterRequest {
    fn from(dto: RegisterRequestDto) -> Self {
        RegisterRequest {
            email: dto.email,
            username: dto.username,
            name: dto.name,
            password: dto.password,
        }
    }
}

/// Exactly one of `email` or `username` is expected; the service decides
/// what to do when both or neither are present.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

impl From<LoginRequestDto> for LoginRequest {
    fn from(dto: LoginRequestDto) -> Self {
        LoginRequest {
            email: dto.email,
            username: dto.username,
            password: dto.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequestDto {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequestDto {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequestDto {
    pub access_token: String,
}

/// Body of `GET /api/v1/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub success: bool,
    pub user_id: String,
}

fn validate_alphanumeric(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("alphanumeric"))
    }
}
