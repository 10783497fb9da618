use actix_web::{http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};

use ta_core::services::auth::{Code, Status};

/// JSON body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: Code,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
        }
    }

    pub fn to_response(&self) -> HttpResponse {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

impl From<&Status> for ErrorResponse {
    fn from(status: &Status) -> Self {
        Self::new(status.code, status.message.clone())
    }
}
