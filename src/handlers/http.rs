//! HTTP handlers: shared state, protected resource, health.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::auth::AuthService;
use crate::middleware::AuthUser;

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(auth_service: AuthService) -> Self {
        Self { auth_service }
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProtectedResponse {
    pub message: String,
    pub logged_in_as: String,
}

/// GET /protected — only reachable with a valid bearer token.
#[utoipa::path(
    get,
    path = "/protected",
    responses(
        (status = 200, description = "Caller is authenticated", body = ProtectedResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::auth::MessageResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn protected(AuthUser(username): AuthUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "This is a protected route".to_string(),
        logged_in_as: username,
    })
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": env!("CARGO_PKG_NAME") })),
    )
}
