//! Sensor routes: manual readings, durable history, and recurring
//! simulation job management.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chaintrace_assets::types::RecordReading;
use chaintrace_core::SensorKind;
use chaintrace_simulator::JobOverrides;
use chaintrace_telemetry::TelemetryEvent;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// Default cadence when a job request does not name one: every 10 s.
const DEFAULT_JOB_INTERVAL_MS: i64 = 10_000;

/// POST /api/sensors/reading — record one manual reading.
///
/// The broadcast happens only after the ledger write confirms, same as
/// a simulator tick.
pub async fn record_reading(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecordReading>,
) -> Result<Json<Value>, ApiError> {
    let (outcome, part_id, reading) = state.assets.record_reading(req).await?;
    state
        .hub
        .publish(&part_id, TelemetryEvent::reading(&part_id, reading));
    Ok(Json(json!({ "success": true, "digest": outcome.digest })))
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_history_limit")]
    pub limit: u32,
}

fn default_history_limit() -> u32 {
    100
}

/// GET /api/sensors/part/{id}/readings — durable history from the
/// ledger's event store, newest first.
pub async fn reading_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Value>, ApiError> {
    let readings = state.assets.reading_history(&id, params.limit).await?;
    Ok(Json(json!({ "success": true, "readings": readings })))
}

#[derive(Debug, Deserialize)]
pub struct AddJobRequest {
    pub asset_id: String,
    pub sensor_kind: SensorKind,
    pub interval_ms: Option<i64>,
    #[serde(flatten)]
    pub overrides: JobOverrides,
}

/// POST /api/sensors/jobs — create or replace the recurring job for
/// (asset, kind).
pub async fn add_job(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddJobRequest>,
) -> Result<Json<Value>, ApiError> {
    let interval_ms = req.interval_ms.unwrap_or(DEFAULT_JOB_INTERVAL_MS);
    let job = state
        .simulator
        .add_job(&req.asset_id, req.sensor_kind, interval_ms, req.overrides)?;
    info!(asset_id = %job.asset_id, kind = %job.kind, interval_ms, "sensor simulation scheduled");
    Ok(Json(json!({ "success": true, "job": job })))
}

#[derive(Debug, Deserialize)]
pub struct RemoveJobRequest {
    pub asset_id: String,
    pub sensor_kind: SensorKind,
}

/// DELETE /api/sensors/jobs — cancel the job for (asset, kind).
/// Removing a job that does not exist succeeds.
pub async fn remove_job(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RemoveJobRequest>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.simulator.remove_job(&req.asset_id, &req.sensor_kind)?;
    Ok(Json(json!({ "success": true, "removed": removed })))
}

/// GET /api/sensors/jobs — all recurring jobs.
pub async fn list_jobs(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let jobs = state.simulator.list_jobs()?;
    Ok(Json(json!({ "success": true, "jobs": jobs })))
}
