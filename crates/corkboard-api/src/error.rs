//! Error taxonomy for the HTTP handlers.
//!
//! Each variant maps to exactly one status code and one fixed plain-text body.
//! The underlying cause is logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("database query failed: {0}")]
    Query(anyhow::Error),

    #[error("database insert failed: {0}")]
    Insert(anyhow::Error),

    #[error("database delete failed: {0}")]
    Delete(anyhow::Error),

    #[error("reading uploaded file failed: {0}")]
    FileRead(#[from] axum::extract::multipart::MultipartError),

    #[error("rendering page failed: {0}")]
    Render(#[from] minijinja::Error),

    #[error("reading form body failed: {0}")]
    FormRead(String),

    #[error("blocking task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("no attachment for message {0}")]
    NotFound(i64),
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database query error"),
            ApiError::Insert(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database insert error"),
            ApiError::Delete(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database delete error"),
            ApiError::FileRead(_) => (StatusCode::INTERNAL_SERVER_ERROR, "File read error"),
            ApiError::Render(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Template render error"),
            ApiError::FormRead(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Form read error"),
            ApiError::Worker(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Attachment not found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }
        (status, body).into_response()
    }
}
