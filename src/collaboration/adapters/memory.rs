//! In-memory membership directory for tests and embedding demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::collaboration::{
    domain::{CollaborationList, ListId, Membership},
    ports::{MembershipDirectory, MembershipDirectoryError, MembershipDirectoryResult},
};
use crate::identity::domain::Username;

/// Thread-safe in-memory membership directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    lists: HashMap<ListId, CollaborationList>,
    // Memberships per list in insertion order, which equals join order.
    members: HashMap<ListId, Vec<Membership>>,
}

impl InMemoryMembershipDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> MembershipDirectoryError {
    MembershipDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted_by_creation(mut lists: Vec<CollaborationList>) -> Vec<CollaborationList> {
    lists.sort_by_key(CollaborationList::created_at);
    lists
}

#[async_trait]
impl MembershipDirectory for InMemoryMembershipDirectory {
    async fn create_list(
        &self,
        list: &CollaborationList,
        owner_membership: &Membership,
    ) -> MembershipDirectoryResult<()> {
        debug_assert_eq!(list.id(), owner_membership.list_id());
        let mut state = self.state.write().map_err(lock_error)?;
        if state.lists.contains_key(&list.id()) {
            return Err(MembershipDirectoryError::DuplicateList(list.id()));
        }
        // Single write-lock section, so the list and its owner membership
        // become visible together or not at all.
        state.lists.insert(list.id(), list.clone());
        state
            .members
            .insert(list.id(), vec![owner_membership.clone()]);
        Ok(())
    }

    async fn add_member(&self, membership: &Membership) -> MembershipDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.lists.contains_key(&membership.list_id()) {
            return Err(MembershipDirectoryError::ListNotFound(membership.list_id()));
        }
        let members = state.members.entry(membership.list_id()).or_default();
        if members
            .iter()
            .any(|existing| existing.username() == membership.username())
        {
            return Err(MembershipDirectoryError::DuplicateMember {
                list_id: membership.list_id(),
                username: membership.username().clone(),
            });
        }
        members.push(membership.clone());
        Ok(())
    }

    async fn find_list(&self, id: ListId) -> MembershipDirectoryResult<Option<CollaborationList>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.lists.get(&id).cloned())
    }

    async fn list_members(&self, id: ListId) -> MembershipDirectoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut members = state.members.get(&id).cloned().unwrap_or_default();
        // Insertion order already matches join order; the stable sort keeps
        // it for equal timestamps.
        members.sort_by_key(Membership::joined_at);
        Ok(members)
    }

    async fn is_member(
        &self,
        id: ListId,
        username: &Username,
    ) -> MembershipDirectoryResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .members
            .get(&id)
            .is_some_and(|members| members.iter().any(|m| m.username() == username)))
    }

    async fn lists_owned_by(
        &self,
        username: &Username,
    ) -> MembershipDirectoryResult<Vec<CollaborationList>> {
        let state = self.state.read().map_err(lock_error)?;
        let owned = state
            .lists
            .values()
            .filter(|list| list.owner() == username)
            .cloned()
            .collect();
        Ok(sorted_by_creation(owned))
    }

    async fn lists_shared_with(
        &self,
        username: &Username,
    ) -> MembershipDirectoryResult<Vec<CollaborationList>> {
        let state = self.state.read().map_err(lock_error)?;
        let shared = state
            .lists
            .values()
            .filter(|list| list.owner() != username)
            .filter(|list| {
                state
                    .members
                    .get(&list.id())
                    .is_some_and(|members| members.iter().any(|m| m.username() == username))
            })
            .cloned()
            .collect();
        Ok(sorted_by_creation(shared))
    }
}
