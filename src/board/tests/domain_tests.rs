//! Domain-focused tests for task construction, workflow, and ordering.

use crate::board::domain::{
    BoardDomainError, Priority, Task, TaskDetails, TaskName, TaskScope, TaskStatus,
};
use crate::collaboration::domain::ListId;
use crate::identity::domain::Username;
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn user(name: &str) -> Username {
    Username::new(name).expect("valid username")
}

fn details(name: &str) -> TaskDetails {
    TaskDetails::new(TaskName::new(name).expect("valid task name"))
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

#[rstest]
#[case("backlog", TaskStatus::Backlog)]
#[case("in-progress", TaskStatus::InProgress)]
#[case("completed", TaskStatus::Completed)]
fn status_parses_canonical_strings(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
    assert_eq!(expected.as_str(), raw);
}

#[rstest]
fn status_rejects_unknown_values() {
    let result = TaskStatus::try_from("done");
    assert_eq!(result, Err(BoardDomainError::UnknownStatus("done".to_owned())));
}

#[rstest]
#[case("high", Priority::High)]
#[case("mid", Priority::Mid)]
#[case("low", Priority::Low)]
fn priority_parses_canonical_strings(#[case] raw: &str, #[case] expected: Priority) {
    assert_eq!(Priority::try_from(raw), Ok(expected));
}

#[rstest]
fn priority_rejects_unknown_values() {
    let result = Priority::try_from("urgent");
    assert_eq!(
        result,
        Err(BoardDomainError::UnknownPriority("urgent".to_owned()))
    );
}

#[rstest]
fn task_name_rejects_empty_values() {
    assert_eq!(TaskName::new("   "), Err(BoardDomainError::EmptyTaskName));
}

#[rstest]
fn personal_task_defaults_to_backlog_without_creator(clock: DefaultClock) {
    let task = Task::personal(user("alice"), details("Water the plants"), &clock);

    assert_eq!(task.status(), TaskStatus::Backlog);
    assert_eq!(task.created_by(), None);
    assert_eq!(
        task.scope(),
        &TaskScope::Personal {
            owner: user("alice")
        }
    );
}

#[rstest]
fn collaborative_task_records_creator(clock: DefaultClock) {
    let list_id = ListId::new();
    let task = Task::collaborative(list_id, user("alice"), details("Write spec"), &clock);

    assert_eq!(task.status(), TaskStatus::Backlog);
    assert_eq!(task.created_by(), Some(&user("alice")));
    assert_eq!(task.scope(), &TaskScope::List { list_id });
}

#[rstest]
fn every_status_is_reachable_from_every_other(clock: DefaultClock) {
    for from in TaskStatus::all() {
        for to in TaskStatus::all() {
            let mut task = Task::personal(user("alice"), details("Anything"), &clock);
            task.set_status(from);
            task.set_status(to);
            assert_eq!(task.status(), to);
        }
    }
}

#[rstest]
fn edit_details_leaves_status_untouched(clock: DefaultClock) {
    let mut task = Task::personal(user("alice"), details("Draft report"), &clock);
    task.set_status(TaskStatus::InProgress);

    task.edit_details(details("Final report").with_priority(Priority::High));

    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.name().as_str(), "Final report");
    assert_eq!(task.details().priority(), Some(Priority::High));
}

#[rstest]
fn board_order_ranks_priority_then_date_then_time(clock: DefaultClock) {
    let owner = user("alice");
    let mut tasks = vec![
        Task::personal(
            owner.clone(),
            details("mid late")
                .with_priority(Priority::Mid)
                .with_due_date(date("2024-01-02")),
            &clock,
        ),
        Task::personal(
            owner.clone(),
            details("high early")
                .with_priority(Priority::High)
                .with_due_date(date("2024-01-01")),
            &clock,
        ),
        Task::personal(
            owner.clone(),
            details("low early")
                .with_priority(Priority::Low)
                .with_due_date(date("2024-01-01")),
            &clock,
        ),
        Task::personal(
            owner.clone(),
            details("high later")
                .with_priority(Priority::High)
                .with_due_date(date("2024-01-03")),
            &clock,
        ),
        Task::personal(owner, details("no priority"), &clock),
    ];

    tasks.sort_by(Task::board_order);

    let names: Vec<&str> = tasks.iter().map(|task| task.name().as_str()).collect();
    assert_eq!(
        names,
        vec!["high early", "high later", "mid late", "low early", "no priority"]
    );
}

#[rstest]
fn board_order_breaks_date_ties_by_time(clock: DefaultClock) {
    let owner = user("alice");
    let mut tasks = vec![
        Task::personal(
            owner.clone(),
            details("afternoon")
                .with_priority(Priority::High)
                .with_due_date(date("2024-01-01"))
                .with_due_time("14:00:00".parse().expect("valid time")),
            &clock,
        ),
        Task::personal(
            owner.clone(),
            details("morning")
                .with_priority(Priority::High)
                .with_due_date(date("2024-01-01"))
                .with_due_time("09:00:00".parse().expect("valid time")),
            &clock,
        ),
        Task::personal(
            owner,
            details("untimed")
                .with_priority(Priority::High)
                .with_due_date(date("2024-01-01")),
            &clock,
        ),
    ];

    tasks.sort_by(Task::board_order);

    let names: Vec<&str> = tasks.iter().map(|task| task.name().as_str()).collect();
    assert_eq!(names, vec!["morning", "afternoon", "untimed"]);
}
