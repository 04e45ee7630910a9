use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};

/// Logs every request with its outcome and latency
pub async fn log_requests(req: Request<Body>, next: Next) -> impl IntoResponse {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = info_span!("request", %method, %path);

    async move {
        let started = Instant::now();
        let response = next.run(req).await;

        let status = response.status();
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        // 503 is the maintenance answer of /properties, not a fault
        if status == StatusCode::SERVICE_UNAVAILABLE {
            warn!(status = status.as_u16(), elapsed_ms, "service unavailable");
        } else if status.is_client_error() || status.is_server_error() {
            error!(status = status.as_u16(), elapsed_ms, "request failed");
        } else {
            info!(status = status.as_u16(), elapsed_ms, "request completed");
        }

        response
    }
    .instrument(span)
    .await
}
