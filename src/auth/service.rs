//! Auth service: signup, login and token checks over the credential store.

use tracing::{debug, info, instrument};

use crate::auth::jwt::{Claims, JwtKeys};
use crate::auth::password::{prepare_dummy, verify_dummy, verify_password};
use crate::error::{AuthError, AuthResult};
use crate::store::CredentialStore;

/// Signed access token handed back on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validates signup and login requests and issues session tokens.
///
/// All operations are synchronous; password hashing is CPU-bound, so async
/// callers should run `signup` and `login` on a blocking thread.
#[derive(Clone)]
pub struct AuthService {
    store: CredentialStore,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(store: CredentialStore, keys: JwtKeys) -> Self {
        prepare_dummy();
        Self { store, keys }
    }

    #[instrument(skip(self, password))]
    pub fn signup(&self, username: &str, password: &str) -> AuthResult<()> {
        self.store.register(username, password)
    }

    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> AuthResult<AccessToken> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput);
        }

        let Some(record) = self.store.find(username) else {
            verify_dummy(password);
            debug!("login for unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &record.password_hash)? {
            debug!("login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.keys.issue(&record.username)?;
        info!("login succeeded");
        Ok(AccessToken(token))
    }

    /// Validate a bearer token and return its claims.
    pub fn authenticate(&self, token: &str) -> AuthResult<Claims> {
        self.keys.validate(token)
    }
}
