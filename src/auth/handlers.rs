//! Auth HTTP handlers: signup, login.

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AuthError};
use crate::handlers::http::AppState;

/// Missing, `null` and empty fields are all treated alike.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct CredentialsRequest {
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Username and password, both present and non-empty.
    pub fn into_parts(self) -> Result<(String, String), AuthError> {
        self.validate().map_err(|_| AuthError::InvalidInput)?;
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AuthError::InvalidInput),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Extractor: username/password from a JSON or `application/x-www-form-urlencoded` body.
#[derive(Debug)]
pub struct Credentials(pub CredentialsRequest);

#[async_trait]
impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let body = if is_form {
            let Form(body) = Form::<CredentialsRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::Payload(e.body_text()))?;
            body
        } else {
            let Json(body) = Json::<CredentialsRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::Payload(e.body_text()))?;
            body
        };
        Ok(Self(body))
    }
}

/// POST /signup
#[utoipa::path(
    post,
    path = "/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Missing fields or username taken", body = MessageResponse),
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Credentials(body): Credentials,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let (username, password) = body.into_parts()?;

    let auth = state.auth_service().clone();
    tokio::task::spawn_blocking(move || auth.signup(&username, &password))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /login
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Missing fields", body = MessageResponse),
        (status = 401, description = "Invalid username or password", body = MessageResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Credentials(body): Credentials,
) -> Result<Json<TokenResponse>, AppError> {
    let (username, password) = body.into_parts()?;

    let auth = state.auth_service().clone();
    let token = tokio::task::spawn_blocking(move || auth.login(&username, &password))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok(Json(TokenResponse {
        access_token: token.into_inner(),
    }))
}
