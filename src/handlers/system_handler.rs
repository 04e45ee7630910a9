use crate::error::Error;
use crate::models::PropertiesDocument;
use crate::state::AppState;
use axum::{extract::State, response::Json};

/// Get the process properties, unless the service is in maintenance
pub async fn get_properties(
    State(state): State<AppState>,
) -> Result<Json<PropertiesDocument>, Error> {
    let _timer = state.metrics.start_request();

    if state.maintenance.is_in_maintenance() {
        tracing::warn!("Properties requested while in maintenance");
        return Err(Error::ServiceUnavailable);
    }

    let document = state.properties_document();
    tracing::debug!("Serving {} properties", document.len());
    Ok(Json(document))
}
