//! Application error type shared across domains.
//!
//! Every fallible action returns [`Error`], which classifies failures into
//! the kinds the HTTP layer knows how to translate. Database and other
//! infrastructure errors convert in via `#[from]` so call sites can use `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A required field is missing or empty, or a value fails a format or
    /// policy check.
    #[error("{0}")]
    Validation(String),

    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The caller is missing a valid credential or lacks the right to act.
    #[error("{0}")]
    Unauthorized(String),

    /// The file storage provider rejected or failed the upload.
    #[error("file upload failed: {0}")]
    UploadFailed(String),

    /// A concurrent write invalidated this save; the caller may retry.
    #[error("the item was modified concurrently, please retry")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }
}

/// Convenience alias used by models and actions.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message.clone()),
            Error::UploadFailed(_) => {
                tracing::error!(error = %self, "File upload failed");
                (StatusCode::BAD_GATEWAY, "file upload failed".to_string())
            }
            Error::Conflict => (StatusCode::CONFLICT, self.to_string()),
            Error::Database(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
