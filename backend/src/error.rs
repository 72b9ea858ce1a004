use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum HbnbError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl HbnbError {
    pub fn not_found(kind: &str) -> Self {
        HbnbError::NotFound(format!("{} not found", kind))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HbnbError::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        HbnbError::Forbidden(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HbnbError::Unauthorized(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HbnbError::NotFound(_) => StatusCode::NOT_FOUND,
            HbnbError::Validation(_) | HbnbError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HbnbError::Conflict(_) => StatusCode::CONFLICT,
            HbnbError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            HbnbError::Forbidden(_) => StatusCode::FORBIDDEN,
            HbnbError::Database(_) | HbnbError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HbnbError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            HbnbError::Database(e) => {
                tracing::error!(error = %e, "Database error while handling request");
                "Database error occurred".to_string()
            }
            HbnbError::Internal(e) => {
                tracing::error!(error = %e, "Internal error while handling request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, HbnbError>;
