//! Collaboration list aggregate and membership records.

use super::{CollaborationDomainError, ListId};
use crate::identity::domain::Username;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated collaboration list name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListName(String);

impl ListName {
    /// Creates a validated list name.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationDomainError::EmptyListName`] when the value
    /// is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, CollaborationDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(CollaborationDomainError::EmptyListName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the list name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ListName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Membership of one username in one collaboration list.
///
/// The pair (list, username) is unique; the directory enforces this at the
/// storage layer. Memberships are never mutated after creation and are
/// destroyed only with their list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    list_id: ListId,
    username: Username,
    joined_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a membership joining now.
    #[must_use]
    pub fn new(list_id: ListId, username: Username, clock: &impl Clock) -> Self {
        Self {
            list_id,
            username,
            joined_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        list_id: ListId,
        username: Username,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            list_id,
            username,
            joined_at,
        }
    }

    /// Returns the list this membership belongs to.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the member username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the join timestamp.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}

/// Collaboration list aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationList {
    id: ListId,
    name: ListName,
    description: Option<String>,
    owner: Username,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Persisted list name.
    pub name: ListName,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted owner username.
    pub owner: Username,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl CollaborationList {
    /// Creates a new list together with its owner membership.
    ///
    /// Returning both values from one constructor establishes the invariant
    /// that the owner is always a member: callers cannot obtain a list
    /// without also obtaining the membership the directory must persist
    /// with it. The membership shares the list's creation timestamp, so the
    /// owner always sorts first in join order.
    #[must_use]
    pub fn create(
        name: ListName,
        description: Option<String>,
        owner: Username,
        clock: &impl Clock,
    ) -> (Self, Membership) {
        let timestamp = clock.utc();
        let id = ListId::new();
        let list = Self {
            id,
            name,
            description,
            owner: owner.clone(),
            created_at: timestamp,
        };
        let owner_membership = Membership::from_persisted(id, owner, timestamp);
        (list, owner_membership)
    }

    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedListData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            owner: data.owner,
            created_at: data.created_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the list name.
    #[must_use]
    pub const fn name(&self) -> &ListName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owner username. The owner is immutable after creation.
    #[must_use]
    pub const fn owner(&self) -> &Username {
        &self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
