//! Contract tests for the in-memory task repository.

use crate::board::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Priority, Task, TaskDetails, TaskName, TaskScope, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::identity::domain::Username;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn repository() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

fn user(name: &str) -> Username {
    Username::new(name).expect("valid username")
}

fn personal_task(owner: &str, name: &str) -> Task {
    Task::personal(
        user(owner),
        TaskDetails::new(TaskName::new(name).expect("valid task name")),
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_and_find_round_trip(repository: InMemoryTaskRepository) {
    let task = personal_task("alice", "Water the plants");
    repository.store(&task).await.expect("store should succeed");

    let fetched = repository
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, Some(task));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(repository: InMemoryTaskRepository) {
    let task = personal_task("alice", "Water the plants");
    repository.store(&task).await.expect("first store");

    let result = repository.store(&task).await;
    assert!(matches!(
        result,
        Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_requires_existing_task(repository: InMemoryTaskRepository) {
    let task = personal_task("alice", "Ghost task");
    let result = repository.update(&task).await;
    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_task_once(repository: InMemoryTaskRepository) {
    let task = personal_task("alice", "Temporary");
    repository.store(&task).await.expect("store");

    repository.delete(task.id()).await.expect("first delete");
    let result = repository.delete(task.id()).await;
    assert!(matches!(
        result,
        Err(TaskRepositoryError::NotFound(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_status_partitions_and_isolates_scopes(repository: InMemoryTaskRepository) {
    let mut in_progress = personal_task("alice", "Started");
    in_progress.set_status(TaskStatus::InProgress);
    let backlog = personal_task("alice", "Not started");
    let other_user = personal_task("bob", "Bob's task");

    repository.store(&in_progress).await.expect("store");
    repository.store(&backlog).await.expect("store");
    repository.store(&other_user).await.expect("store");

    let scope = TaskScope::Personal {
        owner: user("alice"),
    };
    let backlog_bucket = repository
        .list_by_status(&scope, TaskStatus::Backlog)
        .await
        .expect("list backlog");
    let in_progress_bucket = repository
        .list_by_status(&scope, TaskStatus::InProgress)
        .await
        .expect("list in-progress");

    assert_eq!(backlog_bucket, vec![backlog]);
    assert_eq!(in_progress_bucket, vec![in_progress]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_status_returns_board_order(repository: InMemoryTaskRepository) {
    let owner = user("alice");
    let low = Task::personal(
        owner.clone(),
        TaskDetails::new(TaskName::new("low").expect("valid name")).with_priority(Priority::Low),
        &DefaultClock,
    );
    let high = Task::personal(
        owner.clone(),
        TaskDetails::new(TaskName::new("high").expect("valid name")).with_priority(Priority::High),
        &DefaultClock,
    );
    let unspecified = Task::personal(
        owner.clone(),
        TaskDetails::new(TaskName::new("unspecified").expect("valid name")),
        &DefaultClock,
    );

    repository.store(&low).await.expect("store");
    repository.store(&high).await.expect("store");
    repository.store(&unspecified).await.expect("store");

    let bucket = repository
        .list_by_status(&TaskScope::Personal { owner }, TaskStatus::Backlog)
        .await
        .expect("list backlog");
    let names: Vec<&str> = bucket.iter().map(|task| task.name().as_str()).collect();
    assert_eq!(names, vec!["high", "low", "unspecified"]);
}
