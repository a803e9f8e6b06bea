//! Structural column routes — /api/columns/*.

use axum::{
    extract::{Path, State},
    Json,
};
use chaintrace_assets::types::CreateColumn;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;
use crate::error::ApiError;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateColumn>,
) -> Result<Json<Value>, ApiError> {
    let outcome = state.assets.create_column(req).await?;
    Ok(Json(json!({
        "success": true,
        "column_id": outcome.created_object_id,
        "digest": outcome.digest,
    })))
}

pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let column = state.assets.get_asset(&id).await?;
    Ok(Json(json!({ "success": true, "column": column })))
}

pub async fn list_for_owner(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let columns = state.assets.list_columns(&address).await?;
    Ok(Json(json!({ "success": true, "columns": columns })))
}
