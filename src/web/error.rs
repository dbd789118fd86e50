//! HTTP error responses.
//!
//! Every error becomes a JSON body `{"error": "...", "status": 400}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::error::ArchiveError;

/// Error returned by the web handlers.
#[derive(Debug, Error)]
pub enum WebError {
    /// A query parameter was malformed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Building the response failed (500, logged).
    #[error("{0}")]
    Internal(String),
}

impl WebError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ArchiveError> for WebError {
    fn from(err: ArchiveError) -> Self {
        match err {
            ArchiveError::InvalidDate { .. } => WebError::BadRequest(err.to_string()),
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            WebError::BadRequest(message) => message.clone(),
            WebError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                "an internal error occurred".to_string()
            }
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn bad_request_is_400_with_message() {
        let response = WebError::BadRequest("bad page".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "bad page");
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn internal_error_hides_details() {
        let response = WebError::Internal("disk on fire".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8_lossy(&bytes).contains("disk on fire"));
    }

    #[test]
    fn invalid_date_maps_to_bad_request() {
        let err: WebError = ArchiveError::invalid_date("2021-99-99").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("2021-99-99"));
    }

    #[test]
    fn other_archive_errors_are_internal() {
        let err: WebError = ArchiveError::invalid_format("JSON", "'posts' is not an array").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
