//! Error types and error handling for the application
//!
//! Every handler returns `Result<_, AppError>`; the conversion into the
//! JSON response envelope happens here and nowhere else.

use crate::api::envelope::Envelope;
use crate::store::{BookId, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body is not JSON or lacks a required field
    #[error("{0}")]
    Validation(String),

    /// No book exists with the given id
    #[error("Book not found")]
    BookNotFound(BookId),

    /// Persistence backend failed
    #[error("{0}")]
    Backend(#[from] StoreError),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BookNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Backend(e) => tracing::error!(error = %e, "Book store failure"),
            AppError::BookNotFound(id) => tracing::debug!(book_id = id, "Book not found"),
            AppError::Validation(reason) => tracing::debug!(%reason, "Rejected request body"),
        }

        (status, Json(Envelope::error(self.to_string()))).into_response()
    }
}
