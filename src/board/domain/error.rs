//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The priority value is not one of `high`, `mid`, or `low`.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),

    /// The status value is not one of `backlog`, `in-progress`, or
    /// `completed`.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),
}
