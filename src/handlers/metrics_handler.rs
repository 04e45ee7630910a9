use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

/// Expose the properties endpoint metrics to scrapers
pub async fn get_metrics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match state.metrics.render() {
        Ok(output) => Ok((
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            output,
        )),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to encode metrics".to_string(),
            ))
        }
    }
}
