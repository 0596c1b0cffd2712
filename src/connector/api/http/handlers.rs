use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use super::openapi::openapi_document;
use super::routes::AppState;
use super::types::TaskGenerationRequest;
use crate::domain::GenerationResult;

pub const HEALTH_MESSAGE: &str = "Smart Task Generator is running!";

pub async fn generate_tasks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TaskGenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let request = payload.into_domain()?;
    let result = state.generate_tasks.execute(&request).await?;
    Ok(Json(result))
}

pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

pub async fn openapi() -> Json<Value> {
    Json(openapi_document())
}
