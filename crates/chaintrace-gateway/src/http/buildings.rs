//! Building routes — /api/buildings/*.

use axum::{
    extract::{Path, State},
    Json,
};
use chaintrace_assets::types::CreateBuilding;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBuilding>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.create_building(req).await?;
    Ok(Json(json!({
        "success": true,
        "building_id": outcome.created_object_id,
        "digest": outcome.digest,
    })))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let building = state.assets.get_asset(&id).await?;
    Ok(Json(json!({ "success": true, "building": building })))
}

pub async fn list_for_owner(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let buildings = state.assets.list_buildings(&address).await?;
    Ok(Json(json!({ "success": true, "buildings": buildings })))
}
