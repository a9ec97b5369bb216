//! Service layer orchestrating lists, memberships, tasks, and permissions.
//!
//! Every method takes the authenticated actor as an explicit argument; the
//! session lookup producing it is outside this crate. Authorization facts
//! (owner, member set, task creator) are fetched here and handed to the
//! pure predicates in [`permissions`].

use crate::board::{
    domain::{BoardDomainError, Priority, Task, TaskDetails, TaskId, TaskName, TaskScope, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::collaboration::{
    domain::{
        CollaborationDomainError, CollaborationList, ListId, ListName, Membership, permissions,
    },
    ports::{MembershipDirectory, MembershipDirectoryError},
};
use crate::identity::{
    domain::{IdentityDomainError, Username},
    ports::{IdentityStore, IdentityStoreError},
};
use chrono::{NaiveDate, NaiveTime};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Request payload for creating a collaboration list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListRequest {
    name: String,
    description: Option<String>,
    invitees: Vec<String>,
}

impl CreateListRequest {
    /// Creates a request with the required list name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            invitees: Vec::new(),
        }
    }

    /// Sets the list description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the invitee usernames.
    #[must_use]
    pub fn with_invitees(mut self, invitees: impl IntoIterator<Item = String>) -> Self {
        self.invitees = invitees.into_iter().collect();
        self
    }

    /// Sets the invitees from the comma-separated field of the creation
    /// form. Blank segments are dropped.
    #[must_use]
    pub fn with_invitees_csv(mut self, raw: &str) -> Self {
        self.invitees = raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        self
    }
}

/// Draft of a task's descriptive fields as submitted by a client.
///
/// The priority arrives as the raw form value; an empty selection means no
/// priority. Validation happens when the draft is turned into domain
/// details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    name: String,
    priority: Option<String>,
    due_date: Option<NaiveDate>,
    due_time: Option<NaiveTime>,
}

impl TaskDraft {
    /// Creates a draft with the required task name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: None,
            due_date: None,
            due_time: None,
        }
    }

    /// Sets the raw priority value.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
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

    fn into_details(self) -> Result<TaskDetails, BoardDomainError> {
        let mut details = TaskDetails::new(TaskName::new(self.name)?);
        let parsed_priority = self
            .priority
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(Priority::try_from)
            .transpose()?;
        if let Some(priority) = parsed_priority {
            details = details.with_priority(priority);
        }
        if let Some(due_date) = self.due_date {
            details = details.with_due_date(due_date);
        }
        if let Some(due_time) = self.due_time {
            details = details.with_due_time(due_time);
        }
        Ok(details)
    }
}

/// Three-bucket board view in fixed board order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// Tasks not yet started.
    pub backlog: Vec<Task>,
    /// Tasks being worked on.
    pub in_progress: Vec<Task>,
    /// Finished tasks.
    pub completed: Vec<Task>,
}

/// Everything a member sees when opening a collaboration list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    /// List metadata.
    pub list: CollaborationList,
    /// Memberships in join order, owner first.
    pub members: Vec<Membership>,
    /// The list's task board.
    pub board: BoardView,
}

/// A user's two list categories; a list never appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollaborationOverview {
    /// Lists the user owns.
    pub owned: Vec<CollaborationList>,
    /// Lists the user is a member of but does not own.
    pub shared: Vec<CollaborationList>,
}

/// Service-level errors for collaboration operations.
///
/// Not-found and permission failures stay distinct so callers can decide
/// whether to unify them on the wire for authorization opacity; conflating
/// them internally would either leak existence or silently hide errors.
#[derive(Debug, Error)]
pub enum CollaborationError {
    /// A submitted list field failed validation.
    #[error(transparent)]
    InvalidList(#[from] CollaborationDomainError),

    /// A submitted task field failed validation.
    #[error(transparent)]
    InvalidTask(#[from] BoardDomainError),

    /// A submitted username failed validation.
    #[error(transparent)]
    InvalidUsername(#[from] IdentityDomainError),

    /// The list does not exist.
    #[error("collaboration list not found: {0}")]
    ListNotFound(ListId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The actor is authenticated but not authorized for this action.
    #[error("{actor} is not permitted to {action}")]
    PermissionDenied {
        /// Acting username.
        actor: Username,
        /// Human-readable action description.
        action: &'static str,
    },

    /// The candidate is already a member of the list.
    #[error("{username} is already a member of list {list_id}")]
    DuplicateMember {
        /// List the invite targeted.
        list_id: ListId,
        /// Username that was already a member.
        username: Username,
    },

    /// The invitee has no account in the identity store.
    #[error("no account exists for username {0}")]
    UnknownUser(Username),

    /// Membership directory failure.
    #[error(transparent)]
    Directory(MembershipDirectoryError),

    /// Task board failure.
    #[error(transparent)]
    Board(TaskRepositoryError),

    /// Identity store failure.
    #[error(transparent)]
    Identity(#[from] IdentityStoreError),
}

impl From<MembershipDirectoryError> for CollaborationError {
    fn from(err: MembershipDirectoryError) -> Self {
        match err {
            MembershipDirectoryError::ListNotFound(id) => Self::ListNotFound(id),
            MembershipDirectoryError::DuplicateMember { list_id, username } => {
                Self::DuplicateMember { list_id, username }
            }
            other => Self::Directory(other),
        }
    }
}

impl From<TaskRepositoryError> for CollaborationError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Board(other),
        }
    }
}

/// Result type for collaboration service operations.
pub type CollaborationResult<T> = Result<T, CollaborationError>;

/// Collaboration orchestration service.
#[derive(Clone)]
pub struct CollaborationService<D, B, I, C>
where
    D: MembershipDirectory,
    B: TaskRepository,
    I: IdentityStore,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    board: Arc<B>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<D, B, I, C> CollaborationService<D, B, I, C>
where
    D: MembershipDirectory,
    B: TaskRepository,
    I: IdentityStore,
    C: Clock + Send + Sync,
{
    /// Creates a new collaboration service.
    #[must_use]
    pub const fn new(directory: Arc<D>, board: Arc<B>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            directory,
            board,
            identity,
            clock,
        }
    }

    /// Creates a collaboration list owned by the actor.
    ///
    /// The list and the owner's membership are persisted atomically.
    /// Invitees are then handled best-effort: malformed, unknown, owner-
    /// duplicate, and already-member entries are skipped with a log line
    /// rather than failing the already-created list.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::InvalidList`] for an empty name, or a
    /// store error when persistence fails.
    pub async fn create_list(
        &self,
        actor: &Username,
        request: CreateListRequest,
    ) -> CollaborationResult<CollaborationList> {
        let name = ListName::new(request.name)?;
        let (list, owner_membership) =
            CollaborationList::create(name, request.description, actor.clone(), &*self.clock);
        self.directory.create_list(&list, &owner_membership).await?;
        debug!(list_id = %list.id(), owner = %actor, "created collaboration list");

        for raw_invitee in &request.invitees {
            self.invite_best_effort(&list, raw_invitee).await?;
        }
        Ok(list)
    }

    /// Best-effort invite used during list creation.
    ///
    /// Store failures still propagate; everything that is wrong with the
    /// invitee itself only skips that invitee.
    async fn invite_best_effort(
        &self,
        list: &CollaborationList,
        raw: &str,
    ) -> CollaborationResult<()> {
        let Ok(invitee) = Username::new(raw) else {
            warn!(list_id = %list.id(), invitee = raw, "skipping malformed invitee");
            return Ok(());
        };
        if invitee == *list.owner() {
            return Ok(());
        }
        // Identity existence is read before the directory write so no two
        // stores are ever held at once.
        if !self.identity.user_exists(&invitee).await? {
            warn!(list_id = %list.id(), invitee = %invitee, "skipping unknown invitee");
            return Ok(());
        }
        let membership = Membership::new(list.id(), invitee.clone(), &*self.clock);
        match self.directory.add_member(&membership).await {
            Ok(()) => Ok(()),
            Err(MembershipDirectoryError::DuplicateMember { .. }) => {
                warn!(list_id = %list.id(), invitee = %invitee, "skipping duplicate invitee");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Adds a single member to a list. Owner only, and strict: unlike the
    /// bulk invite at creation time, every failure is a hard error.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::ListNotFound`],
    /// [`CollaborationError::PermissionDenied`] for a non-owner actor,
    /// [`CollaborationError::UnknownUser`] for an unregistered candidate,
    /// or [`CollaborationError::DuplicateMember`] when already invited.
    pub async fn add_member(
        &self,
        actor: &Username,
        list_id: ListId,
        candidate: &Username,
    ) -> CollaborationResult<Membership> {
        let list = self.require_list(list_id).await?;
        if !permissions::can_add_member(actor, list.owner()) {
            return Err(CollaborationError::PermissionDenied {
                actor: actor.clone(),
                action: "invite members to this list",
            });
        }
        if !self.identity.user_exists(candidate).await? {
            return Err(CollaborationError::UnknownUser(candidate.clone()));
        }
        let membership = Membership::new(list_id, candidate.clone(), &*self.clock);
        self.directory.add_member(&membership).await?;
        debug!(list_id = %list_id, member = %candidate, "added member");
        Ok(membership)
    }

    /// Returns a list's metadata, ordered member set, and task board.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::ListNotFound`] for an unknown list and
    /// [`CollaborationError::PermissionDenied`] for a non-member actor.
    pub async fn view_list(
        &self,
        actor: &Username,
        list_id: ListId,
    ) -> CollaborationResult<ListView> {
        let list = self.require_list(list_id).await?;
        let members = self.directory.list_members(list_id).await?;
        if !permissions::can_access_list(actor, members.iter().map(Membership::username)) {
            return Err(CollaborationError::PermissionDenied {
                actor: actor.clone(),
                action: "view this list",
            });
        }
        let board = self.board_view(&TaskScope::List { list_id }).await?;
        Ok(ListView {
            list,
            members,
            board,
        })
    }

    /// Returns the actor's owned lists and the lists shared with them.
    ///
    /// # Errors
    ///
    /// Returns a directory error when the store cannot be read.
    pub async fn my_collaborations(
        &self,
        actor: &Username,
    ) -> CollaborationResult<CollaborationOverview> {
        let owned = self.directory.lists_owned_by(actor).await?;
        let shared = self.directory.lists_shared_with(actor).await?;
        Ok(CollaborationOverview { owned, shared })
    }

    /// Returns the actor's personal three-bucket board.
    ///
    /// # Errors
    ///
    /// Returns a board error when the store cannot be read.
    pub async fn personal_board(&self, actor: &Username) -> CollaborationResult<BoardView> {
        self.board_view(&TaskScope::Personal {
            owner: actor.clone(),
        })
        .await
    }

    /// Adds a task to the given scope.
    ///
    /// Personal tasks may only be added by the scope owner; collaborative
    /// tasks require membership and record the actor as creator.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::InvalidTask`] for a bad draft,
    /// [`CollaborationError::ListNotFound`] for an unknown list, or
    /// [`CollaborationError::PermissionDenied`] for an unauthorized actor.
    pub async fn add_task(
        &self,
        actor: &Username,
        scope: TaskScope,
        draft: TaskDraft,
    ) -> CollaborationResult<Task> {
        let details = draft.into_details()?;
        let task = match scope {
            TaskScope::Personal { owner } => {
                if owner != *actor {
                    return Err(CollaborationError::PermissionDenied {
                        actor: actor.clone(),
                        action: "add tasks to another user's board",
                    });
                }
                Task::personal(owner, details, &*self.clock)
            }
            TaskScope::List { list_id } => {
                self.require_member(actor, list_id, "add tasks to this list")
                    .await?;
                Task::collaborative(list_id, actor.clone(), details, &*self.clock)
            }
        };
        self.board.store(&task).await?;
        debug!(task_id = %task.id(), "added task");
        Ok(task)
    }

    /// Replaces a task's four descriptive fields. Status is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::InvalidTask`] for a bad draft,
    /// [`CollaborationError::TaskNotFound`], or
    /// [`CollaborationError::PermissionDenied`] for an actor without access
    /// to the task's scope.
    pub async fn edit_task(
        &self,
        actor: &Username,
        task_id: TaskId,
        draft: TaskDraft,
    ) -> CollaborationResult<Task> {
        let details = draft.into_details()?;
        let mut task = self.require_task(task_id).await?;
        self.authorize_task_access(actor, &task, "edit this task")
            .await?;
        task.edit_details(details);
        self.board.update(&task).await?;
        Ok(task)
    }

    /// Moves a task to the given status. Any status is reachable from any
    /// other; membership in the task's scope is the only requirement.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::TaskNotFound`] or
    /// [`CollaborationError::PermissionDenied`] for an actor without access
    /// to the task's scope.
    pub async fn set_task_status(
        &self,
        actor: &Username,
        task_id: TaskId,
        status: TaskStatus,
    ) -> CollaborationResult<Task> {
        let mut task = self.require_task(task_id).await?;
        self.authorize_task_access(actor, &task, "update this task's status")
            .await?;
        task.set_status(status);
        self.board.update(&task).await?;
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// Personal tasks: owner only. Collaborative tasks: the actor must be
    /// a member, and additionally the task's creator or the list owner.
    /// The checks run in order of increasing strictness, so a non-member
    /// is rejected before the creator/owner rule is consulted.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationError::TaskNotFound`] or
    /// [`CollaborationError::PermissionDenied`].
    pub async fn delete_task(&self, actor: &Username, task_id: TaskId) -> CollaborationResult<()> {
        let task = self.require_task(task_id).await?;
        if let Some(list) = self
            .authorize_task_access(actor, &task, "delete this task")
            .await?
        {
            // Collaborative tasks always record a creator; rows persisted
            // without one fall back to owner-only deletion.
            let creator = task.created_by().unwrap_or_else(|| list.owner());
            if !permissions::can_delete_task(actor, creator, list.owner()) {
                return Err(CollaborationError::PermissionDenied {
                    actor: actor.clone(),
                    action: "delete this task",
                });
            }
        }
        self.board.delete(task.id()).await?;
        debug!(task_id = %task_id, "deleted task");
        Ok(())
    }

    async fn board_view(&self, scope: &TaskScope) -> CollaborationResult<BoardView> {
        Ok(BoardView {
            backlog: self.board.list_by_status(scope, TaskStatus::Backlog).await?,
            in_progress: self
                .board
                .list_by_status(scope, TaskStatus::InProgress)
                .await?,
            completed: self
                .board
                .list_by_status(scope, TaskStatus::Completed)
                .await?,
        })
    }

    async fn require_list(&self, list_id: ListId) -> CollaborationResult<CollaborationList> {
        self.directory
            .find_list(list_id)
            .await?
            .ok_or(CollaborationError::ListNotFound(list_id))
    }

    async fn require_task(&self, task_id: TaskId) -> CollaborationResult<Task> {
        self.board
            .find_by_id(task_id)
            .await?
            .ok_or(CollaborationError::TaskNotFound(task_id))
    }

    /// Loads the list and rejects non-members.
    async fn require_member(
        &self,
        actor: &Username,
        list_id: ListId,
        action: &'static str,
    ) -> CollaborationResult<CollaborationList> {
        let list = self.require_list(list_id).await?;
        let members = self.directory.list_members(list_id).await?;
        if !permissions::can_access_list(actor, members.iter().map(Membership::username)) {
            return Err(CollaborationError::PermissionDenied {
                actor: actor.clone(),
                action,
            });
        }
        Ok(list)
    }

    /// Rejects actors without access to the task's scope: personal tasks
    /// are visible only to their owner, list tasks to list members.
    /// Returns the list for collaborative tasks so callers can apply
    /// stricter owner/creator rules.
    async fn authorize_task_access(
        &self,
        actor: &Username,
        task: &Task,
        action: &'static str,
    ) -> CollaborationResult<Option<CollaborationList>> {
        match task.scope() {
            TaskScope::Personal { owner } => {
                if owner != actor {
                    return Err(CollaborationError::PermissionDenied {
                        actor: actor.clone(),
                        action,
                    });
                }
                Ok(None)
            }
            TaskScope::List { list_id } => {
                let list = self.require_member(actor, *list_id, action).await?;
                Ok(Some(list))
            }
        }
    }
}
