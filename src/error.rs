//! Error types and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::qr::QrError;

/// Errors raised by the session registry.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The supplied code is not six ASCII letters or digits.
    #[error("Invalid room ID: {0:?}")]
    InvalidRoomId(String),

    /// No session carries the requested code.
    #[error("Room not found: {0}")]
    NotFound(String),
}

/// Errors returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Qr(#[from] QrError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Session(SessionError::InvalidRoomId(_)) => StatusCode::BAD_REQUEST,
            Self::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Qr(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid = ApiError::from(SessionError::InvalidRoomId("x".into()));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(SessionError::NotFound("ABC234".into()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let render = crate::qr::render_png(&"A".repeat(8_000)).unwrap_err();
        let failed = ApiError::from(render);
        assert_eq!(
            failed.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_is_passed_through() {
        let err = ApiError::from(SessionError::NotFound("ABC234".into()));
        assert_eq!(err.to_string(), "Room not found: ABC234");
    }
}
