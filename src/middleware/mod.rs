//! Middleware: bearer-token guard for protected routes.

pub mod auth;

pub use auth::{require_auth, AuthUser};
