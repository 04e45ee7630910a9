use crate::handlers::get_properties;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Properties route
pub fn create_system_routes() -> Router<AppState> {
    Router::new().route("/properties", get(get_properties))
}
