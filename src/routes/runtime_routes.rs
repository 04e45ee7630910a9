use crate::handlers::get_runtime;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Server version route
pub fn create_runtime_routes() -> Router<AppState> {
    Router::new().route("/runtime", get(get_runtime))
}
