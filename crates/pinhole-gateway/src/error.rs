use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::{BatchError, ShortenerError};
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
    #[error("short code not found: {0}")]
    NotFound(String),
    #[error("link expired: {0}")]
    Expired(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Shortener(err) => match err {
                ShortenerError::InvalidUrl(_)
                | ShortenerError::InvalidFormat(_)
                | ShortenerError::InvalidTtl(_) => StatusCode::BAD_REQUEST,
                ShortenerError::Collision(_) | ShortenerError::DuplicateKey(_) => {
                    StatusCode::CONFLICT
                }
                ShortenerError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ShortenerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Batch(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Expired(_) => StatusCode::GONE,
        }
    }

    /// Stable machine-readable name of the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Shortener(err) => shortener_error_kind(err),
            AppError::Batch(err) => match err {
                BatchError::Empty => "empty_batch",
                BatchError::TooLarge { .. } => "batch_too_large",
                BatchError::InvalidEntry { .. } => "invalid_entry",
                BatchError::DuplicateCustomCode(_) => "duplicate_custom_code",
            },
            AppError::InvalidBody(_) => "invalid_body",
            AppError::NotFound(_) => "not_found",
            AppError::Expired(_) => "expired",
        }
    }
}

pub(crate) fn shortener_error_kind(err: &ShortenerError) -> &'static str {
    match err {
        ShortenerError::InvalidUrl(_) => "invalid_url",
        ShortenerError::InvalidFormat(_) => "invalid_format",
        ShortenerError::Collision(_) => "collision",
        ShortenerError::AllocationExhausted { .. } => "allocation_exhausted",
        ShortenerError::DuplicateKey(_) => "duplicate_key",
        ShortenerError::InvalidTtl(_) => "invalid_ttl",
        ShortenerError::Storage(_) => "storage",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
