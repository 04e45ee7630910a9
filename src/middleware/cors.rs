use tower_http::cors::{Any, CorsLayer};

/// Read-only endpoints, any origin may call them
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
