pub mod metrics_routes;
pub mod runtime_routes;
pub mod system_routes;

pub use metrics_routes::*;
pub use runtime_routes::*;
pub use system_routes::*;

use crate::middleware::{cors_layer, logging};
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Assemble every route with the shared middleware stack
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_system_routes())
        .merge(create_runtime_routes())
        .merge(create_metrics_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer())
                .layer(axum::middleware::from_fn(logging::log_requests)),
        )
        .with_state(state)
}
