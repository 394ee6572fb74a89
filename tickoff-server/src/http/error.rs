//! Request failure type with IntoResponse
//!
//! Validation and duplicate-title outcomes never get here; handlers turn
//! them into flash messages and re-render the form.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;

/// Unrecovered request failure
#[derive(Debug)]
pub enum ApiError {
    /// List or todo absent, or owned by someone else (404)
    NotFound { resource: &'static str, id: String },

    /// Store failure (logged in full, generic 404-style page)
    Database(DbError),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound { resource, id } => {
                tracing::warn!(resource, id = %id, "Not found");
                (StatusCode::NOT_FOUND, "Not found.").into_response()
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = ?e, "Database error: {}", e);
                (StatusCode::NOT_FOUND, "Something went wrong.").into_response()
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
