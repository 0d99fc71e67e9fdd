use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model API error: {0}")]
    ModelApi(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Empty model result: {0}")]
    EmptyResult(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the caller may reasonably retry the same request.
    ///
    /// Network and provider faults are transient. A schema mismatch or an
    /// empty completion indicates prompt/schema drift and will recur, and
    /// invalid input must be fixed by the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::HttpClient(_) | AppError::ModelApi(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::ModelApi(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) | AppError::SchemaMismatch(_) | AppError::EmptyResult(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
