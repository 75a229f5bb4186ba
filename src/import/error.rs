use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The upload is not a readable workbook or lacks a configured sheet. Nothing was written.
    #[error("invalid workbook: {0}")]
    Format(String),
    /// A bulk statement failed; the steps after it were not attempted.
    #[error("import write failed: {0}")]
    Write(#[from] DbErr),
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        match self {
            ImportError::Format(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("Invalid workbook: {message}") })),
            )
                .into_response(),
            ImportError::Write(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Import failed while writing to the database" })),
            )
                .into_response(),
        }
    }
}
