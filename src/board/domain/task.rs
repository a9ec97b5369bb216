//! Task aggregate root, workflow status, and board ordering.

use super::{BoardDomainError, TaskId};
use crate::collaboration::domain::ListId;
use crate::identity::domain::Username;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Workflow status of a task.
///
/// The status graph is fully connected: any status may move to any other.
/// The domain deliberately imposes no forward-only workflow, so a completed
/// task can return to the backlog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has been captured but work has not started.
    #[default]
    Backlog,
    /// Task is being worked on.
    InProgress,
    /// Task is finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the three statuses in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Backlog, Self::InProgress, Self::Completed]
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "backlog" => Ok(Self::Backlog),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(BoardDomainError::UnknownStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority.
///
/// Tasks may also carry no priority at all; unspecified priority sorts after
/// `low` in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Highest urgency.
    High,
    /// Medium urgency.
    Mid,
    /// Lowest urgency.
    Low,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Mid => "mid",
            Self::Low => "low",
        }
    }

    /// Returns the sort rank, lower ranks listing first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Mid => 1,
            Self::Low => 2,
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = BoardDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "high" => Ok(Self::High),
            "mid" => Ok(Self::Mid),
            "low" => Ok(Self::Low),
            _ => Err(BoardDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort rank for an optional priority; unspecified priority ranks last.
const fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(level) => level.rank(),
        None => 3,
    }
}

/// Owning context of a task.
///
/// Personal tasks belong to a single username; collaborative tasks belong
/// to a collaboration list. The referenced list's existence is an
/// application-level invariant checked at the orchestration layer, not a
/// cross-store foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskScope {
    /// Task on a single user's personal board.
    Personal {
        /// Owning username.
        owner: Username,
    },
    /// Task on a shared collaboration list.
    List {
        /// Owning collaboration list.
        list_id: ListId,
    },
}

/// Validated task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyTaskName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the task name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four descriptive fields of a task, replaced wholesale by an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    name: TaskName,
    priority: Option<Priority>,
    due_date: Option<NaiveDate>,
    due_time: Option<NaiveTime>,
}

impl TaskDetails {
    /// Creates details with the required task name.
    #[must_use]
    pub const fn new(name: TaskName) -> Self {
        Self {
            name,
            priority: None,
            due_date: None,
            due_time: None,
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the due time.
    #[must_use]
    pub const fn with_due_time(mut self, due_time: NaiveTime) -> Self {
        self.due_time = Some(due_time);
        self
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the due time, if set.
    #[must_use]
    pub const fn due_time(&self) -> Option<NaiveTime> {
        self.due_time
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    scope: TaskScope,
    details: TaskDetails,
    status: TaskStatus,
    created_by: Option<Username>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning scope.
    pub scope: TaskScope,
    /// Persisted descriptive fields.
    pub details: TaskDetails,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted creator, present for collaborative tasks.
    pub created_by: Option<Username>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new backlog task on a user's personal board.
    ///
    /// Personal tasks carry no separate creator: the scope already
    /// identifies the owner.
    #[must_use]
    pub fn personal(owner: Username, details: TaskDetails, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            scope: TaskScope::Personal { owner },
            details,
            status: TaskStatus::Backlog,
            created_by: None,
            created_at: clock.utc(),
        }
    }

    /// Creates a new backlog task on a collaboration list.
    ///
    /// The creating member is recorded because deletion is restricted to
    /// the creator or the list owner.
    #[must_use]
    pub fn collaborative(
        list_id: ListId,
        creator: Username,
        details: TaskDetails,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            scope: TaskScope::List { list_id },
            details,
            status: TaskStatus::Backlog,
            created_by: Some(creator),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            scope: data.scope,
            details: data.details,
            status: data.status,
            created_by: data.created_by,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning scope.
    #[must_use]
    pub const fn scope(&self) -> &TaskScope {
        &self.scope
    }

    /// Returns the descriptive fields.
    #[must_use]
    pub const fn details(&self) -> &TaskDetails {
        &self.details
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        self.details.name()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creating member for collaborative tasks.
    #[must_use]
    pub const fn created_by(&self) -> Option<&Username> {
        self.created_by.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the four descriptive fields, leaving status untouched.
    pub fn edit_details(&mut self, details: TaskDetails) {
        self.details = details;
    }

    /// Moves the task to the given status.
    ///
    /// This is the sole status mutator; any status is reachable from any
    /// other.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Compares two tasks in fixed board order: priority rank (high before
    /// mid before low before unspecified), then due date ascending, then
    /// due time ascending. Missing dates and times sort last within their
    /// level.
    #[must_use]
    pub fn board_order(a: &Self, b: &Self) -> Ordering {
        priority_rank(a.details.priority)
            .cmp(&priority_rank(b.details.priority))
            .then_with(|| cmp_missing_last(a.details.due_date, b.details.due_date))
            .then_with(|| cmp_missing_last(a.details.due_time, b.details.due_time))
    }
}

/// Ascending comparison where `None` sorts after any concrete value.
fn cmp_missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
