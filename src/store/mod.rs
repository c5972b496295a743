//! In-memory credential store: username -> credential record, owned by the process.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, instrument};

use crate::auth::password::hash_password;
use crate::error::{AuthError, AuthResult};
use crate::models::CredentialRecord;

/// Shared handle to the account map. Clones point at the same store.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account, hashing the password before it is stored.
    ///
    /// The hash is computed outside the lock; the existence check and insert
    /// happen together under the write lock, so concurrent registrations of
    /// the same username admit exactly one winner.
    #[instrument(skip(self, password))]
    pub fn register(&self, username: &str, password: &str) -> AuthResult<()> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput);
        }
        if self.contains(username) {
            debug!("username already taken");
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let mut accounts = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => {
                debug!("username taken while hashing");
                Err(AuthError::AlreadyExists)
            }
            Entry::Vacant(slot) => {
                slot.insert(CredentialRecord::new(username.to_string(), password_hash));
                info!(accounts = accounts.len(), "account registered");
                Ok(())
            }
        }
    }

    /// Look up an account by exact (case-sensitive) username.
    pub fn find(&self, username: &str) -> Option<CredentialRecord> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(username)
            .cloned()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
