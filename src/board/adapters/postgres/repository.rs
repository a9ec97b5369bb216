//! `PostgreSQL` repository implementation for task board storage.

use super::{
    models::{NewTaskRow, TaskRow, TaskRowChanges},
    schema::tasks,
};
use crate::board::{
    domain::{PersistedTaskData, Priority, Task, TaskDetails, TaskId, TaskName, TaskScope, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::collaboration::domain::ListId;
use crate::identity::domain::Username;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
///
/// The task store is independent of the collaboration store; the two share
/// no foreign keys, so referential checks between a task's list scope and
/// an existing list stay at the orchestration layer.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: BoardPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = to_changes(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changes)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn list_by_status(
        &self,
        scope: &TaskScope,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let lookup_scope = scope.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .select(TaskRow::as_select())
                .filter(tasks::status.eq(status.as_str()))
                .into_boxed();
            query = match &lookup_scope {
                TaskScope::Personal { owner } => query
                    .filter(tasks::owner_username.eq(owner.as_str().to_owned()))
                    .filter(tasks::list_id.is_null()),
                TaskScope::List { list_id } => {
                    query.filter(tasks::list_id.eq(list_id.into_inner()))
                }
            };
            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;

            let mut result = rows
                .into_iter()
                .map(row_to_task)
                .collect::<TaskRepositoryResult<Vec<Task>>>()?;
            // Board order is defined once in the domain; both adapters sort
            // through the same comparator.
            result.sort_by(Task::board_order);
            Ok(result)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    let (owner_username, list_id) = split_scope(task.scope());
    NewTaskRow {
        id: task.id().into_inner(),
        owner_username,
        list_id,
        name: task.name().as_str().to_owned(),
        priority: task.details().priority().map(|p| p.as_str().to_owned()),
        due_date: task.details().due_date(),
        due_time: task.details().due_time(),
        status: task.status().as_str().to_owned(),
        created_by: task.created_by().map(|creator| creator.as_str().to_owned()),
        created_at: task.created_at(),
    }
}

fn to_changes(task: &Task) -> TaskRowChanges {
    TaskRowChanges {
        name: task.name().as_str().to_owned(),
        priority: task.details().priority().map(|p| p.as_str().to_owned()),
        due_date: task.details().due_date(),
        due_time: task.details().due_time(),
        status: task.status().as_str().to_owned(),
    }
}

fn split_scope(scope: &TaskScope) -> (Option<String>, Option<uuid::Uuid>) {
    match scope {
        TaskScope::Personal { owner } => (Some(owner.as_str().to_owned()), None),
        TaskScope::List { list_id } => (None, Some(list_id.into_inner())),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        owner_username,
        list_id,
        name,
        priority,
        due_date,
        due_time,
        status: persisted_status,
        created_by,
        created_at,
    } = row;

    let scope = match (owner_username, list_id) {
        (Some(owner), None) => TaskScope::Personal {
            owner: Username::new(owner).map_err(TaskRepositoryError::persistence)?,
        },
        (None, Some(list)) => TaskScope::List {
            list_id: ListId::from_uuid(list),
        },
        _ => {
            return Err(TaskRepositoryError::persistence(std::io::Error::other(
                format!("task row {id} does not resolve to exactly one scope"),
            )));
        }
    };

    let mut details =
        TaskDetails::new(TaskName::new(name).map_err(TaskRepositoryError::persistence)?);
    if let Some(raw_priority) = priority {
        details = details.with_priority(
            Priority::try_from(raw_priority.as_str()).map_err(TaskRepositoryError::persistence)?,
        );
    }
    if let Some(date) = due_date {
        details = details.with_due_date(date);
    }
    if let Some(time) = due_time {
        details = details.with_due_time(time);
    }

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let creator = created_by
        .map(Username::new)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        scope,
        details,
        status,
        created_by: creator,
        created_at,
    };
    Ok(Task::from_persisted(data))
}
