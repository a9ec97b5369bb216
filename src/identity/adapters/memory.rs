//! In-memory identity store for tests and embedding demos.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::Username,
    ports::{IdentityStore, IdentityStoreError, IdentityStoreResult},
};

/// Thread-safe in-memory account registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStore {
    accounts: Arc<RwLock<HashSet<Username>>>,
}

impl InMemoryIdentityStore {
    /// Creates an empty identity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given usernames.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = Username>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }

    /// Registers a username so later existence checks succeed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::Lookup`] when the registry lock is
    /// poisoned.
    pub fn register(&self, username: Username) -> IdentityStoreResult<()> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|err| IdentityStoreError::lookup(std::io::Error::other(err.to_string())))?;
        accounts.insert(username);
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn user_exists(&self, username: &Username) -> IdentityStoreResult<bool> {
        let accounts = self
            .accounts
            .read()
            .map_err(|err| IdentityStoreError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(accounts.contains(username))
    }
}
