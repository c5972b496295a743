//! OpenAPI document for the HTTP API, served at `/openapi.json` and browsable at `/swagger/`.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::auth::{CredentialsRequest, MessageResponse, TokenResponse};
use crate::handlers::http::ProtectedResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::auth::handlers::signup,
        crate::auth::handlers::login,
        crate::handlers::http::protected,
    ),
    components(schemas(CredentialsRequest, MessageResponse, TokenResponse, ProtectedResponse)),
    modifiers(&BearerAuth),
    tags((name = "auth", description = "Signup, login and token-protected access"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
