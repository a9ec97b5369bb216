//! Port contract onto the external account store.

use super::domain::Username;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity store operations.
pub type IdentityStoreResult<T> = Result<T, IdentityStoreError>;

/// Read-only view of the external account store.
///
/// The collaboration core never creates or mutates accounts; it only checks
/// that a username resolves to an account before granting it a membership.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Reports whether an account with the given username exists.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityStoreError::Lookup`] when the backing account
    /// store cannot be queried.
    async fn user_exists(&self, username: &Username) -> IdentityStoreResult<bool>;
}

/// Errors returned by identity store implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityStoreError {
    /// Lookup against the backing account store failed.
    #[error("identity lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityStoreError {
    /// Wraps a lookup failure.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
