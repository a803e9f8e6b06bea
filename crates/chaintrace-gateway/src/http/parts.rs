//! Part routes — POST /api/parts/*.

use axum::{
    extract::{Path, State},
    Json,
};
use chaintrace_assets::types::{AttachPart, CreatePart, PerformMaintenance, UpdateFlightHours};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePart>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.create_part(req).await?;
    Ok(Json(json!({
        "success": true,
        "part_id": outcome.created_object_id,
        "digest": outcome.digest,
    })))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let part = state.assets.get_asset(&id).await?;
    Ok(Json(json!({ "success": true, "part": part })))
}

pub async fn attach(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AttachPart>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.attach_part(&id, req).await?;
    Ok(Json(json!({ "success": true, "digest": outcome.digest })))
}

pub async fn update_hours(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateFlightHours>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.update_part_hours(&id, req).await?;
    Ok(Json(json!({ "success": true, "digest": outcome.digest })))
}

pub async fn maintenance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<PerformMaintenance>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.perform_maintenance(&id, req).await?;
    Ok(Json(json!({ "success": true, "digest": outcome.digest })))
}

pub async fn activate(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.mark_part_active(&id).await?;
    Ok(Json(json!({ "success": true, "digest": outcome.digest })))
}

pub async fn list_for_owner(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let parts = state.assets.list_parts(&address).await?;
    Ok(Json(json!({ "success": true, "parts": parts })))
}
