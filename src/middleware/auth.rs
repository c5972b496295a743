//! Bearer-token guard for protected routes.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;

/// Extractor: authenticated username from a valid `Authorization: Bearer <jwt>` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Already checked by `require_auth` further out.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| {
                    debug!(reason = %e, "rejected request: bad Authorization header");
                    if e.is_missing() {
                        AppError::Unauthorized("Missing Authorization Header".to_string())
                    } else {
                        AppError::Unauthorized("Invalid Authorization Header".to_string())
                    }
                })?;

        let claims = state.auth_service().authenticate(bearer.token()).map_err(|e| {
            debug!(reason = %e, "rejected request: invalid token");
            AppError::from(e)
        })?;
        Ok(AuthUser(claims.sub))
    }
}

/// Middleware: reject the request before any handler runs unless it carries a
/// valid bearer token. The resolved `AuthUser` is stored in request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &state).await?;
    parts.extensions.insert(user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
