use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{AppState, exporter_metrics, health, index, scrape};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(exporter_metrics))
        .route("/scrape", get(scrape))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
