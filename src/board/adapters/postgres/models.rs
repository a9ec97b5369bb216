//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning username for personal tasks.
    pub owner_username: Option<String>,
    /// Owning collaboration list for shared tasks.
    pub list_id: Option<uuid::Uuid>,
    /// Task name.
    pub name: String,
    /// Optional priority.
    pub priority: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional due time.
    pub due_time: Option<NaiveTime>,
    /// Workflow status.
    pub status: String,
    /// Creating member, collaborative tasks only.
    pub created_by: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning username for personal tasks.
    pub owner_username: Option<String>,
    /// Owning collaboration list for shared tasks.
    pub list_id: Option<uuid::Uuid>,
    /// Task name.
    pub name: String,
    /// Optional priority.
    pub priority: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional due time.
    pub due_time: Option<NaiveTime>,
    /// Workflow status.
    pub status: String,
    /// Creating member, collaborative tasks only.
    pub created_by: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Changeset covering every mutable task column.
///
/// `None` writes SQL `NULL` rather than skipping the column, so clearing a
/// priority or due date persists correctly.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskRowChanges {
    /// Task name.
    pub name: String,
    /// Optional priority.
    pub priority: Option<String>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Optional due time.
    pub due_time: Option<NaiveTime>,
    /// Workflow status.
    pub status: String,
}
