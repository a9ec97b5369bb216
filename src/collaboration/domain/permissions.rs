//! Pure authorization rules for collaboration lists.
//!
//! These three predicates are the entire authorization surface of the
//! collaboration core. They perform no storage I/O: the orchestration
//! service fetches the facts first and passes them in. For each mutating
//! endpoint they are evaluated in order of increasing strictness:
//! unauthenticated, then not-a-member, then (for delete only)
//! neither-creator-nor-owner.

use crate::identity::domain::Username;

/// Only the list owner may invite members; there is no co-owner or admin
/// role.
#[must_use]
pub fn can_add_member(actor: &Username, list_owner: &Username) -> bool {
    actor == list_owner
}

/// Membership governs viewing a list and its board, adding tasks, editing
/// tasks, and changing task status. None of these require ownership.
#[must_use]
pub fn can_access_list<'a>(
    actor: &Username,
    members: impl IntoIterator<Item = &'a Username>,
) -> bool {
    members.into_iter().any(|member| member == actor)
}

/// Deletion is strictly stricter than edit: only the task creator or the
/// list owner may delete a collaborative task.
#[must_use]
pub fn can_delete_task(actor: &Username, task_creator: &Username, list_owner: &Username) -> bool {
    actor == task_creator || actor == list_owner
}
