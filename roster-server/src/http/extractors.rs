//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON body extractor whose rejections are validation errors.
///
/// Unlike `axum::Json` this does not insist on a `Content-Type` header, and
/// any unreadable or mistyped body becomes a 400 in the uniform envelope.
/// The body must be a JSON object; arrays and scalars are rejected even when
/// `T` could be built from them positionally.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidBody {
                reason: e.body_text(),
            })
        })?;

        let value: Value = serde_json::from_slice(&bytes).map_err(invalid_body)?;
        if !value.is_object() {
            return Err(ApiError::Validation(ValidationError::InvalidBody {
                reason: "expected a JSON object".to_owned(),
            }));
        }

        let parsed = serde_json::from_value(value).map_err(invalid_body)?;
        Ok(Self(parsed))
    }
}

fn invalid_body(e: serde_json::Error) -> ApiError {
    ApiError::Validation(ValidationError::InvalidBody {
        reason: e.to_string(),
    })
}
