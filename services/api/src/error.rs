//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use workforce::{ErrorKind, ServiceError};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Failure reported by the workforce service
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::InvalidPin) => StatusCode::UNAUTHORIZED,
            ApiError::Service(err) => match err.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::Transient => StatusCode::SERVICE_UNAVAILABLE,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Service(err) if err.kind() == ErrorKind::Internal => {
                error!("Internal error: {}", err);
                "Internal server error".to_string()
            }
            ApiError::Service(err) => err.to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use workforce::models::TimeOffStatus;

    fn status_of(err: ServiceError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_service_errors_map_to_statuses() {
        assert_eq!(status_of(ServiceError::InvalidPin), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(ServiceError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ServiceError::CodeExpired), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ServiceError::NotAReviewer), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(ServiceError::WorkerNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ServiceError::PinInUse), StatusCode::CONFLICT);
        assert_eq!(
            status_of(ServiceError::AlreadyReviewed(TimeOffStatus::Approved)),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(ServiceError::Unavailable), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status_of(ServiceError::Internal("hash".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_status() {
        let response = ApiError::BadRequest("worker_id is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
