//! JWT issue and validation.

use crate::error::{AuthError, AuthResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(rename = "type")]
    pub token_type: String,
    /// Issued straight from a password login rather than a refresh.
    pub fresh: bool,
}

/// HS256 signing and verification keys plus the lifetime of issued tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a fresh access token for `username`.
    pub fn issue(&self, username: &str) -> AuthResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            fresh: true,
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check signature, expiry and token type; return the claims on success.
    pub fn validate(&self, token: &str) -> AuthResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Expiry is exact: no grace period past `exp`.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(describe(e.kind()).to_string()))?;
        if data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(AuthError::InvalidToken(
                "Only access tokens are allowed".to_string(),
            ));
        }
        Ok(data.claims)
    }
}

fn describe(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ExpiredSignature => "Token has expired",
        ErrorKind::ImmatureSignature => "Token is not yet valid",
        ErrorKind::InvalidSignature => "Signature verification failed",
        ErrorKind::InvalidAlgorithm => "Invalid token algorithm",
        _ => "Invalid token",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-jwt-secret-min-32-chars!!!!";

    fn keys() -> JwtKeys {
        JwtKeys::new(SECRET, Duration::minutes(15))
    }

    #[test]
    fn issued_token_validates() {
        let keys = keys();
        let token = keys.issue("alice").unwrap();
        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.fresh);
        assert_eq!(claims.token_type, "access");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn each_token_is_unique() {
        let keys = keys();
        let a = keys.issue("alice").unwrap();
        let b = keys.issue("alice").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = JwtKeys::new("another-secret-that-is-32-chars!!", Duration::minutes(15))
            .issue("alice")
            .unwrap();
        assert_eq!(
            keys().validate(&token),
            Err(AuthError::InvalidToken(
                "Signature verification failed".to_string()
            ))
        );
    }

    #[test]
    fn swapped_payload_is_rejected() {
        let keys = keys();
        let alice = keys.issue("alice").unwrap();
        let mallory = keys.issue("mallory").unwrap();

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let mallory_parts: Vec<&str> = mallory.split('.').collect();
        let forged = format!("{}.{}.{}", alice_parts[0], mallory_parts[1], alice_parts[2]);

        assert!(matches!(
            keys.validate(&forged),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = keys();
        let now = Utc::now().timestamp();
        let token = keys
            .encode(&Claims {
                sub: "alice".to_string(),
                iat: now - 7200,
                nbf: now - 7200,
                exp: now - 3600,
                jti: Uuid::new_v4().to_string(),
                token_type: ACCESS_TOKEN_TYPE.to_string(),
                fresh: true,
            })
            .unwrap();
        assert_eq!(
            keys.validate(&token),
            Err(AuthError::InvalidToken("Token has expired".to_string()))
        );
    }

    #[test]
    fn token_expired_seconds_ago_is_rejected() {
        let keys = keys();
        let now = Utc::now().timestamp();
        let token = keys
            .encode(&Claims {
                sub: "alice".to_string(),
                iat: now - 905,
                nbf: now - 905,
                exp: now - 5,
                jti: Uuid::new_v4().to_string(),
                token_type: ACCESS_TOKEN_TYPE.to_string(),
                fresh: true,
            })
            .unwrap();
        assert_eq!(
            keys.validate(&token),
            Err(AuthError::InvalidToken("Token has expired".to_string()))
        );
    }

    #[test]
    fn non_access_token_is_rejected() {
        let keys = keys();
        let now = Utc::now().timestamp();
        let token = keys
            .encode(&Claims {
                sub: "alice".to_string(),
                iat: now,
                nbf: now,
                exp: now + 600,
                jti: Uuid::new_v4().to_string(),
                token_type: "refresh".to_string(),
                fresh: false,
            })
            .unwrap();
        assert!(matches!(
            keys.validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            keys().validate("not.a.jwt"),
            Err(AuthError::InvalidToken("Invalid token".to_string()))
        );
    }
}
