pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod store;
pub mod topology;
pub mod wire;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use store::Store;

pub type AppState = Arc<Store>;

/// Build the router independently of the bound listener, so integration
/// tests can drive it with `tower::ServiceExt::oneshot` without a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/traces", get(handlers::traces::list_traces))
        .route("/api/traces/{traceId}", get(handlers::traces::get_trace))
        .route(
            "/api/traces/{traceId}/services/{service}",
            get(handlers::traces::get_trace_service),
        )
        .route("/api/spans/{spanId}", get(handlers::traces::get_span))
        .route("/api/metrics", get(handlers::metrics::list_metrics))
        .route("/api/metrics/{service}", get(handlers::metrics::metrics_by_service))
        .route(
            "/api/metrics/{service}/{metricName}",
            get(handlers::metrics::metric_timeseries),
        )
        .route("/api/logs", get(handlers::logs::list_logs))
        .route("/api/logs/trace/{traceId}", get(handlers::logs::logs_by_trace))
        .route("/api/topology", get(handlers::topology::get_topology))
        .route("/api/services", get(handlers::services::list_services))
        .route("/api/stats", get(handlers::stats::get_stats))
        .route("/healthz", get(handlers::health::healthz))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
