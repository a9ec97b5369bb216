//! Behavioural tests for the collaboration service against the in-memory
//! adapters.

use crate::board::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Priority, TaskScope, TaskStatus},
};
use crate::collaboration::{
    adapters::memory::InMemoryMembershipDirectory,
    domain::{CollaborationList, ListId},
    ports::MembershipDirectory,
    services::{CollaborationError, CollaborationService, CreateListRequest, TaskDraft},
};
use crate::identity::{adapters::memory::InMemoryIdentityStore, domain::Username};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type Service = CollaborationService<
    InMemoryMembershipDirectory,
    InMemoryTaskRepository,
    InMemoryIdentityStore,
    DefaultClock,
>;

struct Harness {
    service: Service,
    directory: Arc<InMemoryMembershipDirectory>,
}

#[fixture]
fn harness() -> Harness {
    let directory = Arc::new(InMemoryMembershipDirectory::new());
    let board = Arc::new(InMemoryTaskRepository::new());
    let identity = Arc::new(InMemoryIdentityStore::with_users([
        user("bob"),
        user("alice"),
        user("carol"),
    ]));
    let service = CollaborationService::new(
        Arc::clone(&directory),
        board,
        identity,
        Arc::new(DefaultClock),
    );
    Harness { service, directory }
}

fn user(name: &str) -> Username {
    Username::new(name).expect("valid username")
}

async fn sprint_list(harness: &Harness) -> CollaborationList {
    harness
        .service
        .create_list(
            &user("bob"),
            CreateListRequest::new("Sprint").with_invitees(vec!["alice".to_owned()]),
        )
        .await
        .expect("list creation should succeed")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_a_list_makes_the_owner_a_member(harness: Harness) {
    let list = harness
        .service
        .create_list(&user("bob"), CreateListRequest::new("Sprint"))
        .await
        .expect("creation should succeed");

    assert!(
        harness
            .directory
            .is_member(list.id(), &user("bob"))
            .await
            .expect("membership check")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_a_list_rejects_a_blank_name(harness: Harness) {
    let result = harness
        .service
        .create_list(&user("bob"), CreateListRequest::new("   "))
        .await;
    assert!(matches!(result, Err(CollaborationError::InvalidList(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_invite_skips_bad_entries_and_keeps_good_ones(harness: Harness) {
    let request = CreateListRequest::new("Sprint")
        .with_invitees_csv("alice, ghost_user, bob, , alice, bad name, carol");
    let list = harness
        .service
        .create_list(&user("bob"), request)
        .await
        .expect("creation should survive bad invitees");

    let members = harness
        .directory
        .list_members(list.id())
        .await
        .expect("member lookup");
    let names: Vec<&str> = members
        .iter()
        .map(|membership| membership.username().as_str())
        .collect();
    assert_eq!(names, vec!["bob", "alice", "carol"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_is_owner_only(harness: Harness) {
    let list = sprint_list(&harness).await;

    let result = harness
        .service
        .add_member(&user("alice"), list.id(), &user("carol"))
        .await;
    assert!(matches!(
        result,
        Err(CollaborationError::PermissionDenied { actor, .. }) if actor == user("alice")
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_rejects_unknown_accounts(harness: Harness) {
    let list = sprint_list(&harness).await;

    let result = harness
        .service
        .add_member(&user("bob"), list.id(), &user("ghost_user"))
        .await;
    assert!(matches!(
        result,
        Err(CollaborationError::UnknownUser(name)) if name == user("ghost_user")
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_rejects_existing_members(harness: Harness) {
    let list = sprint_list(&harness).await;

    let result = harness
        .service
        .add_member(&user("bob"), list.id(), &user("alice"))
        .await;
    assert!(matches!(
        result,
        Err(CollaborationError::DuplicateMember { username, .. }) if username == user("alice")
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_member_reports_missing_lists(harness: Harness) {
    let ghost = ListId::new();
    let result = harness
        .service
        .add_member(&user("bob"), ghost, &user("alice"))
        .await;
    assert!(matches!(
        result,
        Err(CollaborationError::ListNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn view_list_is_member_only(harness: Harness) {
    let list = sprint_list(&harness).await;

    let view = harness
        .service
        .view_list(&user("alice"), list.id())
        .await
        .expect("members may view");
    assert_eq!(view.list, list);
    assert_eq!(view.members.len(), 2);

    let denied = harness.service.view_list(&user("carol"), list.id()).await;
    assert!(matches!(
        denied,
        Err(CollaborationError::PermissionDenied { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn view_list_reports_missing_lists(harness: Harness) {
    let ghost = ListId::new();
    let result = harness.service.view_list(&user("bob"), ghost).await;
    assert!(matches!(
        result,
        Err(CollaborationError::ListNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_require_membership_and_record_the_creator(harness: Harness) {
    let list = sprint_list(&harness).await;
    let scope = TaskScope::List { list_id: list.id() };

    let task = harness
        .service
        .add_task(
            &user("alice"),
            scope.clone(),
            TaskDraft::new("Write spec").with_priority("high"),
        )
        .await
        .expect("members may add tasks");
    assert_eq!(task.created_by(), Some(&user("alice")));
    assert_eq!(task.status(), TaskStatus::Backlog);
    assert_eq!(task.details().priority(), Some(Priority::High));

    let denied = harness
        .service
        .add_task(&user("carol"), scope, TaskDraft::new("Sneak in"))
        .await;
    assert!(matches!(
        denied,
        Err(CollaborationError::PermissionDenied { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn personal_tasks_belong_to_their_owner_alone(harness: Harness) {
    let scope = TaskScope::Personal {
        owner: user("alice"),
    };
    let denied = harness
        .service
        .add_task(&user("bob"), scope.clone(), TaskDraft::new("Intrusion"))
        .await;
    assert!(matches!(
        denied,
        Err(CollaborationError::PermissionDenied { .. })
    ));

    harness
        .service
        .add_task(&user("alice"), scope, TaskDraft::new("Water the plants"))
        .await
        .expect("owner may add");

    let alice_board = harness
        .service
        .personal_board(&user("alice"))
        .await
        .expect("alice's board");
    let bob_board = harness
        .service
        .personal_board(&user("bob"))
        .await
        .expect("bob's board");
    assert_eq!(alice_board.backlog.len(), 1);
    assert!(bob_board.backlog.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn add_task_rejects_unknown_priorities(harness: Harness) {
    let scope = TaskScope::Personal { owner: user("bob") };
    let result = harness
        .service
        .add_task(
            &user("bob"),
            scope,
            TaskDraft::new("Anything").with_priority("urgent"),
        )
        .await;
    assert!(matches!(result, Err(CollaborationError::InvalidTask(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_changes_are_open_to_members_in_any_direction(harness: Harness) {
    let list = sprint_list(&harness).await;
    let task = harness
        .service
        .add_task(
            &user("bob"),
            TaskScope::List { list_id: list.id() },
            TaskDraft::new("Write spec"),
        )
        .await
        .expect("add task");

    let completed = harness
        .service
        .set_task_status(&user("alice"), task.id(), TaskStatus::Completed)
        .await
        .expect("members may move tasks");
    assert_eq!(completed.status(), TaskStatus::Completed);

    let reopened = harness
        .service
        .set_task_status(&user("alice"), task.id(), TaskStatus::Backlog)
        .await
        .expect("completed tasks may reopen");
    assert_eq!(reopened.status(), TaskStatus::Backlog);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_a_task_preserves_its_status(harness: Harness) {
    let list = sprint_list(&harness).await;
    let task = harness
        .service
        .add_task(
            &user("bob"),
            TaskScope::List { list_id: list.id() },
            TaskDraft::new("Write spec"),
        )
        .await
        .expect("add task");
    harness
        .service
        .set_task_status(&user("bob"), task.id(), TaskStatus::InProgress)
        .await
        .expect("move task");

    let edited = harness
        .service
        .edit_task(
            &user("alice"),
            task.id(),
            TaskDraft::new("Review spec").with_priority("mid"),
        )
        .await
        .expect("members may edit");
    assert_eq!(edited.status(), TaskStatus::InProgress);
    assert_eq!(edited.name().as_str(), "Review spec");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_is_limited_to_creator_or_owner(harness: Harness) {
    let list = sprint_list(&harness).await;
    harness
        .service
        .add_member(&user("bob"), list.id(), &user("carol"))
        .await
        .expect("invite carol");
    let scope = TaskScope::List { list_id: list.id() };

    let by_alice = harness
        .service
        .add_task(&user("alice"), scope.clone(), TaskDraft::new("Alice's"))
        .await
        .expect("add task");
    let denied = harness.service.delete_task(&user("carol"), by_alice.id()).await;
    assert!(matches!(
        denied,
        Err(CollaborationError::PermissionDenied { actor, .. }) if actor == user("carol")
    ));

    harness
        .service
        .delete_task(&user("alice"), by_alice.id())
        .await
        .expect("creator may delete");

    let by_carol = harness
        .service
        .add_task(&user("carol"), scope, TaskDraft::new("Carol's"))
        .await
        .expect("add task");
    harness
        .service
        .delete_task(&user("bob"), by_carol.id())
        .await
        .expect("owner may delete any list task");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_an_unknown_task_reports_not_found(harness: Harness) {
    let list = sprint_list(&harness).await;
    let task = harness
        .service
        .add_task(
            &user("bob"),
            TaskScope::List { list_id: list.id() },
            TaskDraft::new("Write spec"),
        )
        .await
        .expect("add task");
    harness
        .service
        .delete_task(&user("bob"), task.id())
        .await
        .expect("first delete");

    let result = harness.service.delete_task(&user("bob"), task.id()).await;
    assert!(matches!(
        result,
        Err(CollaborationError::TaskNotFound(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn my_collaborations_separates_owned_from_shared(harness: Harness) {
    let bobs = sprint_list(&harness).await;
    let alices = harness
        .service
        .create_list(
            &user("alice"),
            CreateListRequest::new("Recipes").with_invitees(vec!["bob".to_owned()]),
        )
        .await
        .expect("alice's list");

    let overview = harness
        .service
        .my_collaborations(&user("bob"))
        .await
        .expect("overview");
    assert_eq!(overview.owned, vec![bobs]);
    assert_eq!(overview.shared, vec![alices]);
}
