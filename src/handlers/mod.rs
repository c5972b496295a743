//! HTTP handlers outside the auth module.

pub mod http;

pub use http::{health, protected, AppState};
