use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// GET /health — liveness probe, returns server metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "network": state.config.ledger.network,
        "service_address": state.service_address,
        "live_subscriptions": state.hub.subscription_total(),
        "timestamp": chrono::Utc::now().timestamp_millis(),
    }))
}
