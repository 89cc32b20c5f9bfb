//! API error types with IntoResponse
//!
//! Every failure becomes `{"success": false, "message": ...}`. Validation and
//! conflict errors are 400; store failures are 500 with a generic message
//! and the real cause only in the log.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Json};
use serde_json::json;
use tower::timeout::error::Elapsed;

use crate::models::ValidationError;
use crate::service::ServiceError;

/// Message returned when listing fails.
pub const LIST_FAILED: &str = "failed to fetch records";

/// Message returned when creating fails for a reason other than the input.
pub const CREATE_FAILED: &str = "an internal server error occurred";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing field or unreadable body (400)
    Validation(ValidationError),

    /// External code already registered (400)
    Conflict { message: String },

    /// Store or other unexpected failure (500, logged)
    Internal { message: &'static str },
}

impl ApiError {
    /// Map a service error, using `internal_message` for store failures.
    pub fn from_service(err: ServiceError, internal_message: &'static str) -> Self {
        match err {
            ServiceError::Validation(e) => Self::Validation(e),
            err @ ServiceError::Conflict { .. } => Self::Conflict {
                message: err.to_string(),
            },
            ServiceError::Store(e) => {
                tracing::error!(error = %e, "{}", internal_message);
                Self::Internal {
                    message: internal_message,
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Conflict { message } => message.clone(),
            Self::Internal { message } => (*message).to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "message": self.message(),
        });

        (self.status(), Json(body)).into_response()
    }
}

/// Turn a middleware failure (request timeout) into the error envelope.
///
/// Reads go out with the list message, everything else with the create
/// message, matching what the handler itself would have returned.
pub async fn handle_middleware_error(method: Method, err: BoxError) -> ApiError {
    let message = if method == Method::GET {
        LIST_FAILED
    } else {
        CREATE_FAILED
    };

    if err.is::<Elapsed>() {
        tracing::error!(%method, "request timed out");
    } else {
        tracing::error!(%method, error = %err, "unhandled middleware error");
    }

    ApiError::Internal { message }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Missing {
            fields: vec!["name"],
        });
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "all fields are required (missing: name)");
    }

    #[tokio::test]
    async fn conflict_is_400_and_names_code() {
        let err = ApiError::from_service(
            ServiceError::Conflict {
                external_code: "X1".into(),
            },
            CREATE_FAILED,
        );
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "external code 'X1' is already registered");
    }

    #[tokio::test]
    async fn store_error_is_500_with_generic_message() {
        let err = ApiError::from_service(
            ServiceError::Store(DbError::Sqlx(sqlx::Error::PoolTimedOut)),
            LIST_FAILED,
        );
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], LIST_FAILED);
    }

    #[tokio::test]
    async fn timeout_maps_to_operation_message() {
        let err = handle_middleware_error(Method::GET, Box::new(Elapsed::new())).await;
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], LIST_FAILED);

        let err = handle_middleware_error(Method::POST, Box::new(Elapsed::new())).await;
        let (_, body) = body_json(err).await;
        assert_eq!(body["message"], CREATE_FAILED);
    }
}
