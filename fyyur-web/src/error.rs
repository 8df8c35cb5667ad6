//! Error types for fyyur-web
//!
//! Every handler failure becomes a JSON document:
//! `{"error": {"code", "message"}}`, plus a `notice` for rejected form
//! submissions. Server-side failures carry a generic message; the underlying
//! detail only goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Message returned in place of server-side error detail
const GENERIC_MESSAGE: &str = "An internal error occurred";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// A create or edit submission that did not go through
    ///
    /// Status follows the underlying error; the notice is shown to the user.
    #[error("{notice}")]
    Rejected {
        notice: String,
        #[source]
        source: fyyur_common::Error,
    },

    /// fyyur-common error
    #[error("Common error: {0}")]
    Common(#[from] fyyur_common::Error),
}

impl ApiError {
    pub fn rejected(notice: impl Into<String>, source: fyyur_common::Error) -> Self {
        ApiError::Rejected {
            notice: notice.into(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { source, .. } | ApiError::Common(source) => common_status(source).0,
        }
    }
}

/// Status and error code for a fyyur-common error
fn common_status(err: &fyyur_common::Error) -> (StatusCode, &'static str) {
    use fyyur_common::Error;

    match err {
        Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        Error::Integrity(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTEGRITY_ERROR"),
        Error::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        Error::Io(_) | Error::Config(_) | Error::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, mut message, notice) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, None),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
                None,
            ),
            ApiError::Rejected { notice, source } => {
                let (status, code) = common_status(&source);
                (status, code, source.to_string(), Some(notice))
            }
            ApiError::Common(ref err) => {
                let (status, code) = common_status(err);
                (status, code, err.to_string(), None)
            }
        };

        if status.is_server_error() {
            error!("{} {}: {}", status.as_u16(), error_code, message);
            message = GENERIC_MESSAGE.to_string();
        } else if notice.is_some() {
            warn!("Submission rejected: {}", message);
        }

        let mut body = json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });
        if let Some(notice) = notice {
            body["notice"] = json!(notice);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fyyur_common::Error;

    #[test]
    fn test_common_errors_map_to_status() {
        assert_eq!(
            ApiError::from(Error::NotFound("venue 9".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(Error::InvalidInput("name is required".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(Error::Integrity("dangling show".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    async fn response_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_server_errors_hide_detail() {
        let (status, body) = response_json(ApiError::rejected(
            "An error occurred. Venue X could not be listed.",
            Error::Database(sqlx::Error::Protocol("no such table: venues".into())),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
        assert_eq!(body["error"]["message"], GENERIC_MESSAGE);
        assert_eq!(body["notice"], "An error occurred. Venue X could not be listed.");

        let (_, body) = response_json(Error::Internal("disk full".into()).into()).await;
        assert_eq!(body["error"]["message"], GENERIC_MESSAGE);
    }

    #[tokio::test]
    async fn test_client_errors_keep_detail() {
        let (status, body) = response_json(ApiError::rejected(
            "An error occurred. Venue X could not be listed.",
            Error::InvalidInput("name is required".into()),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid input: name is required");
    }

    #[test]
    fn test_rejected_follows_source_status() {
        let rejected = ApiError::rejected(
            "An error occurred. Venue X could not be listed.",
            Error::Internal("disk full".into()),
        );
        assert_eq!(rejected.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            rejected.to_string(),
            "An error occurred. Venue X could not be listed."
        );
    }
}
