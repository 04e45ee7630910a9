use crate::handlers::get_metrics;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Prometheus scrape route
pub fn create_metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(get_metrics))
}
