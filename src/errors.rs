use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{0}")]
    Validation(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    pub fn validation<T: ToString>(msg: T) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Translates a failed read against the store.
    pub fn fetch(err: StoreError) -> Self {
        error!("Store read failed: {}", err);
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::FetchFailed(other.to_string()),
        }
    }

    /// Translates a failed write against the store.
    pub fn write(err: StoreError) -> Self {
        error!("Store write failed: {}", err);
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::WriteFailed(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::AuthRequired | BoardError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            BoardError::Forbidden => StatusCode::FORBIDDEN,
            BoardError::NotFound(_) => StatusCode::NOT_FOUND,
            BoardError::UserAlreadyExists => StatusCode::CONFLICT,
            BoardError::FetchFailed(_) | BoardError::WriteFailed(_) => StatusCode::BAD_GATEWAY,
            BoardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for BoardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        BoardError::Validation(errors.to_string())
    }
}

/// Convert board errors to HTTP responses
///
/// Internal details are logged, never echoed back to the client.
impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            BoardError::Internal(msg) => {
                error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}
