use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};

/// Get the server version as plain text.
///
/// The version is best-effort: a failed lookup is logged and answered with
/// `200` and an empty body, never with an error status.
pub async fn get_runtime(State(state): State<AppState>) -> impl IntoResponse {
    let version = match state.runtime_version_service.server_version() {
        Ok(version) => Some(version),
        Err(e) => {
            tracing::warn!(error = %e, "Unable to retrieve server version.");
            None
        }
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        version.unwrap_or_default(),
    )
}
