//! Diesel schema for collaboration list persistence.
//!
//! Lists and memberships live in the same store, so the member table may
//! carry a real foreign key with cascade delete. The task store is a
//! separate database with no keys into these tables.

diesel::table! {
    /// Collaboration list records.
    collab_lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Owning username. Immutable after creation.
        #[max_length = 255]
        owner_username -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Membership rows, unique per (list, username).
    collab_members (list_id, username) {
        /// List the membership belongs to.
        list_id -> Uuid,
        /// Member username.
        #[max_length = 255]
        username -> Varchar,
        /// Join timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::joinable!(collab_members -> collab_lists (list_id));
diesel::allow_tables_to_appear_in_same_query!(collab_lists, collab_members);
