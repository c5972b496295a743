//! Password hashing and verification (Argon2id, random per-hash salt).

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{AuthError, AuthResult};

/// Hash a password into a self-describing PHC string (algorithm, params, salt, hash).
pub fn hash_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Check a password against a stored PHC string. The digest comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash_password("timing-equalizer").ok())
        .as_deref()
}

/// Build the throwaway hash used by `verify_dummy` up front, so the first
/// unknown-username login does not pay for hashing on top of verifying.
pub fn prepare_dummy() {
    let _ = dummy_hash();
}

#[cfg(test)]
pub(crate) fn dummy_is_ready() -> bool {
    DUMMY_HASH.get().is_some()
}

/// Run one verification against a throwaway hash so that a login for an unknown
/// username costs as much as one for a known username.
pub fn verify_dummy(password: &str) {
    if let Some(hash) = dummy_hash() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("mypassword").unwrap();
        assert!(verify_password("mypassword", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2id$"));
        assert!(verify_password("same", &a).unwrap());
        assert!(verify_password("same", &b).unwrap());
    }

    #[test]
    fn prepared_dummy_hash_is_cached() {
        prepare_dummy();
        assert!(dummy_is_ready());
        let first = dummy_hash().unwrap();
        assert!(std::ptr::eq(first, dummy_hash().unwrap()));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("pw", "not-a-phc-string"),
            Err(AuthError::Hashing(_))
        ));
    }
}
