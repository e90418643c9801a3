//! Error body and status mapping shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::scheduling::SchedulingError;

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            code: "FORBIDDEN".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&SchedulingError> for ErrorResponse {
    fn from(err: &SchedulingError) -> Self {
        let details = match err {
            SchedulingError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            SchedulingError::NotFound { kind, id } => {
                Some(serde_json::json!({ "entity": kind.to_string(), "id": id }))
            }
        };
        let message = match err {
            SchedulingError::Validation { message, .. } => message.clone(),
            SchedulingError::NotFound { .. } => err.to_string(),
        };
        Self {
            code: err.code().to_string(),
            message,
            details,
        }
    }
}

/// Maps a use-case error to its HTTP response.
pub fn scheduling_error(err: SchedulingError) -> Response {
    let status = match &err {
        SchedulingError::Validation { .. } => StatusCode::BAD_REQUEST,
        SchedulingError::NotFound { .. } => StatusCode::NOT_FOUND,
    };
    (status, Json(ErrorResponse::from(&err))).into_response()
}

/// 400 for a path identifier that does not parse.
pub fn invalid_id(what: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(format!("Invalid {} ID", what))),
    )
        .into_response()
}

/// 403 for an authenticated caller acting outside its role.
pub fn forbidden(message: &str) -> Response {
    (StatusCode::FORBIDDEN, Json(ErrorResponse::forbidden(message))).into_response()
}
