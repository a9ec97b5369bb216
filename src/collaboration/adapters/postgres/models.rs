//! Diesel row models for collaboration list persistence.

use super::schema::{collab_lists, collab_members};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for list records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = collab_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning username.
    pub owner_username: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for list records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collab_lists)]
pub struct NewListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Owning username.
    pub owner_username: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for membership records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = collab_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// List the membership belongs to.
    pub list_id: uuid::Uuid,
    /// Member username.
    pub username: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

/// Insert model for membership records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collab_members)]
pub struct NewMemberRow {
    /// List the membership belongs to.
    pub list_id: uuid::Uuid,
    /// Member username.
    pub username: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}
