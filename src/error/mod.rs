//! Error types: domain auth errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Outcomes of credential and token operations. Free of any HTTP types so the
/// auth core can be driven from anywhere.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username and password are required")]
    InvalidInput,

    #[error("User already exists")]
    AlreadyExists,

    /// Unknown username or wrong password; the two are deliberately indistinguishable.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidToken(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Application-level (HTTP boundary) errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid payload: {0}")]
    Payload(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Auth(e) => match e {
                AuthError::InvalidInput | AuthError::AlreadyExists => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                AuthError::InvalidCredentials | AuthError::InvalidToken(_) => {
                    (StatusCode::UNAUTHORIZED, e.to_string())
                }
                AuthError::Hashing(_) | AuthError::Signing(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Payload(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
