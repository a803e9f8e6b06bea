use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use chaintrace_assets::AssetService;
use chaintrace_core::ChaintraceConfig;
use chaintrace_simulator::SimulatorHandle;
use chaintrace_telemetry::TelemetryHub;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: ChaintraceConfig,
    pub assets: AssetService,
    pub hub: Arc<TelemetryHub>,
    pub simulator: SimulatorHandle,
    /// The service account address all writes are attributed to.
    pub service_address: String,
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origin);

    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/ws", get(crate::ws::connection::ws_handler))
        // aircraft
        .route("/api/aircraft/create", post(crate::http::aircraft::create))
        .route("/api/aircraft/{id}", get(crate::http::aircraft::get_one))
        .route(
            "/api/aircraft/{id}/complete-flight",
            post(crate::http::aircraft::complete_flight),
        )
        .route(
            "/api/aircraft/{id}/change-status",
            post(crate::http::aircraft::change_status),
        )
        .route(
            "/api/aircraft/owner/{address}",
            get(crate::http::aircraft::list_for_owner),
        )
        // parts
        .route("/api/parts/create", post(crate::http::parts::create))
        .route("/api/parts/{id}", get(crate::http::parts::get_one))
        .route("/api/parts/{id}/attach", post(crate::http::parts::attach))
        .route(
            "/api/parts/{id}/update-hours",
            post(crate::http::parts::update_hours),
        )
        .route(
            "/api/parts/{id}/maintenance",
            post(crate::http::parts::maintenance),
        )
        .route("/api/parts/{id}/activate", post(crate::http::parts::activate))
        .route(
            "/api/parts/owner/{address}",
            get(crate::http::parts::list_for_owner),
        )
        // buildings & columns
        .route("/api/buildings/create", post(crate::http::buildings::create))
        .route("/api/buildings/{id}", get(crate::http::buildings::get_one))
        .route(
            "/api/buildings/owner/{address}",
            get(crate::http::buildings::list_for_owner),
        )
        .route("/api/columns/create", post(crate::http::columns::create))
        .route("/api/columns/{id}", get(crate::http::columns::get_one))
        .route(
            "/api/columns/owner/{address}",
            get(crate::http::columns::list_for_owner),
        )
        // sensors
        .route("/api/sensors/reading", post(crate::http::sensors::record_reading))
        .route(
            "/api/sensors/part/{id}/readings",
            get(crate::http::sensors::reading_history),
        )
        .route(
            "/api/sensors/jobs",
            post(crate::http::sensors::add_job)
                .get(crate::http::sensors::list_jobs)
                .delete(crate::http::sensors::remove_job),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(cors),
        )
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| {
            warn!(allowed_origin, "invalid allowed_origin — falling back to localhost");
            HeaderValue::from_static("http://localhost:5173")
        });
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}
