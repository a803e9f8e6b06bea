//! Aircraft routes — POST /api/aircraft/*.

use axum::{
    extract::{Path, State},
    Json,
};
use chaintrace_assets::types::{ChangeStatus, CompleteFlight, CreateAircraft};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAircraft>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.create_aircraft(req).await?;
    Ok(Json(json!({
        "success": true,
        "aircraft_id": outcome.created_object_id,
        "digest": outcome.digest,
    })))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let aircraft = state.assets.get_asset(&id).await?;
    Ok(Json(json!({ "success": true, "aircraft": aircraft })))
}

pub async fn complete_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CompleteFlight>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.complete_flight(&id, req).await?;
    Ok(Json(json!({ "success": true, "digest": outcome.digest })))
}

pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ChangeStatus>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.change_aircraft_status(&id, req).await?;
    Ok(Json(json!({ "success": true, "digest": outcome.digest })))
}

pub async fn list_for_owner(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let aircraft = state.assets.list_aircraft(&address).await?;
    Ok(Json(json!({ "success": true, "aircraft": aircraft })))
}
