//! Repository port for collaboration lists and memberships.

use crate::collaboration::domain::{CollaborationList, ListId, Membership};
use crate::identity::domain::Username;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership directory operations.
pub type MembershipDirectoryResult<T> = Result<T, MembershipDirectoryError>;

/// Persistence contract for lists and their member sets.
#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Atomically persists a new list together with its owner membership.
    ///
    /// Implementations must guarantee that either both records exist
    /// afterwards or neither does; a list without its owner membership must
    /// never be observable.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipDirectoryError::DuplicateList`] when the list ID
    /// already exists.
    async fn create_list(
        &self,
        list: &CollaborationList,
        owner_membership: &Membership,
    ) -> MembershipDirectoryResult<()>;

    /// Inserts a membership row.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipDirectoryError::ListNotFound`] when the list
    /// does not exist and [`MembershipDirectoryError::DuplicateMember`]
    /// when the (list, username) pair is already present. Uniqueness is
    /// enforced by the storage layer, so concurrent duplicate inserts
    /// resolve to exactly one success.
    async fn add_member(&self, membership: &Membership) -> MembershipDirectoryResult<()>;

    /// Finds a list by identifier.
    ///
    /// Returns `None` when the list does not exist.
    async fn find_list(&self, id: ListId) -> MembershipDirectoryResult<Option<CollaborationList>>;

    /// Returns a list's memberships ordered by join time ascending.
    ///
    /// The owner joined at creation time and therefore sorts first.
    async fn list_members(&self, id: ListId) -> MembershipDirectoryResult<Vec<Membership>>;

    /// Reports whether the username is a member of the list.
    async fn is_member(&self, id: ListId, username: &Username)
    -> MembershipDirectoryResult<bool>;

    /// Returns the lists owned by the username.
    async fn lists_owned_by(
        &self,
        username: &Username,
    ) -> MembershipDirectoryResult<Vec<CollaborationList>>;

    /// Returns the lists the username is a member of but does not own.
    ///
    /// Owned lists are excluded even though the owner holds a membership
    /// row, so a user's own list never shows up in both categories.
    async fn lists_shared_with(
        &self,
        username: &Username,
    ) -> MembershipDirectoryResult<Vec<CollaborationList>>;
}

/// Errors returned by membership directory implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipDirectoryError {
    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// The list was not found.
    #[error("collaboration list not found: {0}")]
    ListNotFound(ListId),

    /// The username is already a member of the list.
    #[error("{username} is already a member of list {list_id}")]
    DuplicateMember {
        /// List the duplicate insert targeted.
        list_id: ListId,
        /// Username that was already present.
        username: Username,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
