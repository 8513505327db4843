//! Shared HTTP error mapping.
//!
//! Every endpoint reports failures in the same JSON shape, and domain error
//! codes map onto HTTP statuses in one place.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn from_domain(error: &DomainError) -> Self {
        let details = if error.details.is_empty() {
            None
        } else {
            serde_json::to_value(&error.details).ok()
        };
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            details,
        }
    }
}

/// Maps a domain error onto an HTTP response.
pub fn domain_error_response(error: DomainError) -> Response {
    let status = status_for(error.code);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(code = %error.code, message = %error.message, "Request failed");
    }
    (status, Json(ErrorResponse::from_domain(&error))).into_response()
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ProblemNotFound | ErrorCode::ConnectionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ProblemExists | ErrorCode::DuplicateConnection => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}
