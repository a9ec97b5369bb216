//! Diesel schema for task board persistence.

diesel::table! {
    /// Personal and collaborative task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning username for personal tasks.
        #[max_length = 255]
        owner_username -> Nullable<Varchar>,
        /// Owning collaboration list for shared tasks.
        list_id -> Nullable<Uuid>,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional priority (`high`, `mid`, `low`).
        #[max_length = 10]
        priority -> Nullable<Varchar>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Optional due time.
        due_time -> Nullable<Time>,
        /// Workflow status.
        #[max_length = 20]
        status -> Varchar,
        /// Creating member, recorded for collaborative tasks only.
        #[max_length = 255]
        created_by -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
