//! Domain model for tasks and their workflow.
//!
//! The board domain models task creation in personal and collaborative
//! scopes, descriptive-field edits, unrestricted status transitions, and
//! the fixed ordering used to display a status bucket, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::BoardDomainError;
pub use ids::TaskId;
pub use task::{PersistedTaskData, Priority, Task, TaskDetails, TaskName, TaskScope, TaskStatus};
