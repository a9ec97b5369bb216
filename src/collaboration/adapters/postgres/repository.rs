//! `PostgreSQL` repository implementation for the membership directory.

use super::{
    models::{ListRow, MemberRow, NewListRow, NewMemberRow},
    schema::{collab_lists, collab_members},
};
use crate::collaboration::{
    domain::{CollaborationList, ListId, ListName, Membership, PersistedListData},
    ports::{MembershipDirectory, MembershipDirectoryError, MembershipDirectoryResult},
};
use crate::identity::domain::Username;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by collaboration adapters.
pub type CollabPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed membership directory.
#[derive(Debug, Clone)]
pub struct PostgresMembershipDirectory {
    pool: CollabPgPool,
}

impl PostgresMembershipDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CollabPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> MembershipDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> MembershipDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(MembershipDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(MembershipDirectoryError::persistence)?
    }
}

impl From<DieselError> for MembershipDirectoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl MembershipDirectory for PostgresMembershipDirectory {
    async fn create_list(
        &self,
        list: &CollaborationList,
        owner_membership: &Membership,
    ) -> MembershipDirectoryResult<()> {
        let list_id = list.id();
        let list_row = to_new_list_row(list);
        let member_row = to_new_member_row(owner_membership);

        self.run_blocking(move |connection| {
            // One transaction: the list and the owner membership become
            // visible together or not at all.
            connection.transaction::<_, MembershipDirectoryError, _>(|conn| {
                diesel::insert_into(collab_lists::table)
                    .values(&list_row)
                    .execute(conn)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            MembershipDirectoryError::DuplicateList(list_id)
                        }
                        _ => MembershipDirectoryError::persistence(err),
                    })?;
                diesel::insert_into(collab_members::table)
                    .values(&member_row)
                    .execute(conn)
                    .map_err(MembershipDirectoryError::persistence)?;
                Ok(())
            })
        })
        .await
    }

    async fn add_member(&self, membership: &Membership) -> MembershipDirectoryResult<()> {
        let list_id = membership.list_id();
        let username = membership.username().clone();
        let member_row = to_new_member_row(membership);

        self.run_blocking(move |connection| {
            diesel::insert_into(collab_members::table)
                .values(&member_row)
                .execute(connection)
                .map_err(|err| match err {
                    // The composite primary key is the uniqueness
                    // constraint; concurrent duplicate inserts resolve here.
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        MembershipDirectoryError::DuplicateMember {
                            list_id,
                            username: username.clone(),
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        MembershipDirectoryError::ListNotFound(list_id)
                    }
                    _ => MembershipDirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_list(&self, id: ListId) -> MembershipDirectoryResult<Option<CollaborationList>> {
        self.run_blocking(move |connection| {
            let row = collab_lists::table
                .filter(collab_lists::id.eq(id.into_inner()))
                .select(ListRow::as_select())
                .first::<ListRow>(connection)
                .optional()
                .map_err(MembershipDirectoryError::persistence)?;
            row.map(row_to_list).transpose()
        })
        .await
    }

    async fn list_members(&self, id: ListId) -> MembershipDirectoryResult<Vec<Membership>> {
        self.run_blocking(move |connection| {
            let rows = collab_members::table
                .filter(collab_members::list_id.eq(id.into_inner()))
                .order(collab_members::joined_at.asc())
                .select(MemberRow::as_select())
                .load::<MemberRow>(connection)
                .map_err(MembershipDirectoryError::persistence)?;
            rows.into_iter().map(row_to_membership).collect()
        })
        .await
    }

    async fn is_member(
        &self,
        id: ListId,
        username: &Username,
    ) -> MembershipDirectoryResult<bool> {
        let member_username = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                collab_members::table
                    .filter(collab_members::list_id.eq(id.into_inner()))
                    .filter(collab_members::username.eq(member_username)),
            ))
            .get_result::<bool>(connection)
            .map_err(MembershipDirectoryError::persistence)
        })
        .await
    }

    async fn lists_owned_by(
        &self,
        username: &Username,
    ) -> MembershipDirectoryResult<Vec<CollaborationList>> {
        let owner = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = collab_lists::table
                .filter(collab_lists::owner_username.eq(owner))
                .order(collab_lists::created_at.asc())
                .select(ListRow::as_select())
                .load::<ListRow>(connection)
                .map_err(MembershipDirectoryError::persistence)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }

    async fn lists_shared_with(
        &self,
        username: &Username,
    ) -> MembershipDirectoryResult<Vec<CollaborationList>> {
        let member_username = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = collab_lists::table
                .inner_join(collab_members::table)
                .filter(collab_members::username.eq(member_username.clone()))
                .filter(collab_lists::owner_username.ne(member_username))
                .order(collab_lists::created_at.asc())
                .select(ListRow::as_select())
                .load::<ListRow>(connection)
                .map_err(MembershipDirectoryError::persistence)?;
            rows.into_iter().map(row_to_list).collect()
        })
        .await
    }
}

fn to_new_list_row(list: &CollaborationList) -> NewListRow {
    NewListRow {
        id: list.id().into_inner(),
        name: list.name().as_str().to_owned(),
        description: list.description().map(ToOwned::to_owned),
        owner_username: list.owner().as_str().to_owned(),
        created_at: list.created_at(),
    }
}

fn to_new_member_row(membership: &Membership) -> NewMemberRow {
    NewMemberRow {
        list_id: membership.list_id().into_inner(),
        username: membership.username().as_str().to_owned(),
        joined_at: membership.joined_at(),
    }
}

fn row_to_list(row: ListRow) -> MembershipDirectoryResult<CollaborationList> {
    let data = PersistedListData {
        id: ListId::from_uuid(row.id),
        name: ListName::new(row.name).map_err(MembershipDirectoryError::persistence)?,
        description: row.description,
        owner: Username::new(row.owner_username)
            .map_err(MembershipDirectoryError::persistence)?,
        created_at: row.created_at,
    };
    Ok(CollaborationList::from_persisted(data))
}

fn row_to_membership(row: MemberRow) -> MembershipDirectoryResult<Membership> {
    Ok(Membership::from_persisted(
        ListId::from_uuid(row.list_id),
        Username::new(row.username).map_err(MembershipDirectoryError::persistence)?,
        row.joined_at,
    ))
}
