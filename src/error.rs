use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

pub const MAINTENANCE_MESSAGE: &str = "ERROR: Service is currently in maintenance.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", MAINTENANCE_MESSAGE)]
    ServiceUnavailable,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_unavailable_message() {
        assert_eq!(Error::ServiceUnavailable.to_string(), MAINTENANCE_MESSAGE);
        assert_eq!(
            MAINTENANCE_MESSAGE,
            "ERROR: Service is currently in maintenance."
        );
    }

    #[test]
    fn test_service_unavailable_status() {
        let response = Error::ServiceUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
