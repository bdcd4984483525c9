//! Error types for licklog-api

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use licklog_common::api::types::{ErrorDetail, ErrorResponse};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// licklog-common error, status chosen by variant
    #[error(transparent)]
    Common(#[from] licklog_common::Error),
}

impl ApiError {
    fn parts(self) -> (StatusCode, &'static str, String, Vec<String>) {
        use licklog_common::Error as Common;

        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, Vec::new()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, Vec::new()),
            ApiError::Common(err) => match err {
                Common::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, Vec::new()),
                Common::InvalidSortStrategy(_) => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_SORT_STRATEGY",
                    err.to_string(),
                    Vec::new(),
                ),
                Common::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, Vec::new())
                }
                Common::Validation(validation) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_FAILED",
                    validation.to_string(),
                    validation.field_names().into_iter().map(String::from).collect(),
                ),
                other => {
                    tracing::error!("Request failed: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        other.to_string(),
                        Vec::new(),
                    )
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = self.parts();

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                fields,
            },
        });

        (status, body).into_response()
    }
}

impl From<licklog_common::ValidationError> for ApiError {
    fn from(err: licklog_common::ValidationError) -> Self {
        ApiError::Common(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use licklog_common::ValidationError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::NotFound("lick 3".into()), StatusCode::NOT_FOUND),
            (
                ApiError::Common(licklog_common::Error::InvalidSortStrategy("Bpm".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Common(licklog_common::Error::Internal("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_validation_lists_fields() {
        let mut validation = ValidationError::default();
        validation.push("name", "can't be blank");

        let (status, code, _, fields) = ApiError::from(validation).parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_FAILED");
        assert_eq!(fields, vec!["name"]);
    }
}
