//! Stored credential record.

use std::fmt;

use chrono::{DateTime, Utc};

/// A registered account: username plus its Argon2 PHC hash string.
#[derive(Clone)]
pub struct CredentialRecord {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
