//! Minimal signup/login service built with Rust.
//!
//! Accounts live in an in-memory credential store with Argon2-hashed
//! passwords; a successful login yields a signed JWT that unlocks the
//! protected routes.

pub mod auth;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

pub use auth::{AuthService, JwtKeys};
pub use config::Config;
pub use error::{AppError, AuthError};
pub use handlers::http::AppState;
pub use store::CredentialStore;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the API router (signup, login, protected, health, Swagger UI). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let protected_routes = axum::Router::new()
        .route("/protected", get(handlers::protected))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    axum::Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger").url("/openapi.json", docs::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
