//! Error responses in RFC 7807 Problem Details form

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use engine_runtime::error::RunnerError;
use serde::Serialize;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RunnerError> for AppError {
    fn from(err: RunnerError) -> Self {
        match err {
            RunnerError::AlreadyRunning => AppError::Conflict(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    problem_type: Option<String>,
    title: String,
    status: u16,
    detail: String,
}

impl ErrorResponse {
    pub fn from_error(err: &AppError) -> Self {
        let status = err.status_code();
        Self {
            problem_type: None,
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from_error(&self))).into_response()
    }
}
