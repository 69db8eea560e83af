//! HTTP error responses.
//!
//! Every failure is rendered as `{"detail": "..."}` with a matching
//! status code, the shape the web client reads its error text from.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use depthcast_api::{ErrorDetail, OutOfRange};

/// Errors returned by the route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The export format path segment is not `stl`, `obj` or `dxf`.
    #[error("Unsupported format")]
    UnsupportedFormat,

    /// A query parameter or form field is missing, malformed or out of
    /// range.
    #[error("{0}")]
    Validation(String),

    /// The multipart body could not be read, e.g. because it exceeds
    /// the upload limit.
    #[error("{detail}")]
    Multipart {
        /// Status reported by the multipart reader.
        status: StatusCode,
        /// Reader error text.
        detail: String,
    },

    /// The requested file does not exist or the name is not allowed.
    #[error("File not found")]
    NotFound,

    /// The preview could not be produced.
    #[error("Preview failed: {0}")]
    Preview(String),

    /// The export could not be produced.
    #[error("Export failed: {0}")]
    Export(String),

    /// Any other server-side failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code sent with this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedFormat => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Multipart { status, .. } => *status,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Preview(_) | Self::Export(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub(crate) fn preview(err: impl std::fmt::Display) -> Self {
        Self::Preview(err.to_string())
    }

    pub(crate) fn export(err: impl std::fmt::Display) -> Self {
        Self::Export(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, "{self}");
        } else {
            tracing::warn!(%status, "{self}");
        }
        (status, Json(ErrorDetail::new(self.to_string()))).into_response()
    }
}

impl From<OutOfRange> for ApiError {
    fn from(err: OutOfRange) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        Self::Validation(err.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(err: MultipartRejection) -> Self {
        Self::Validation(err.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart {
            status: err.status(),
            detail: err.body_text(),
        }
    }
}
