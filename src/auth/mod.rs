//! Authentication: password hashing, JWT, signup/login.

pub mod handlers;
pub mod jwt;
pub mod password;
mod service;

pub use handlers::{login, signup, CredentialsRequest, MessageResponse, TokenResponse};
pub use jwt::{Claims, JwtKeys};
pub use service::{AccessToken, AuthService};
