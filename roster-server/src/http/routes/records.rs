//! Record endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::http::error::{ApiError, CREATE_FAILED, LIST_FAILED};
use crate::http::extractors::ValidJson;
use crate::http::server::AppState;
use crate::models::{Record, RecordDraft};

/// Message returned with a newly created record.
pub const CREATED_MESSAGE: &str = "record created successfully";

/// Success envelope: `{"success": true, "message"?: ..., "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: &'static str, data: T) -> Self {
        Self {
            success: true,
            message: Some(message),
            data,
        }
    }
}

/// GET /records - all records, newest first
async fn list_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Record>>>, ApiError> {
    let records = state
        .records
        .list()
        .await
        .map_err(|e| ApiError::from_service(e, LIST_FAILED))?;

    Ok(Json(ApiResponse::ok(records)))
}

/// POST /records - validate and create a record
async fn create_record(
    State(state): State<Arc<AppState>>,
    ValidJson(draft): ValidJson<RecordDraft>,
) -> Result<(StatusCode, Json<ApiResponse<Record>>), ApiError> {
    let record = state
        .records
        .create(draft)
        .await
        .map_err(|e| ApiError::from_service(e, CREATE_FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(CREATED_MESSAGE, record)),
    ))
}

/// Record routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/records", get(list_records).post(create_record))
}
