//! Error types for collaboration domain validation.

use thiserror::Error;

/// Errors returned while constructing collaboration domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaborationDomainError {
    /// The list name is empty after trimming.
    #[error("list name must not be empty")]
    EmptyListName,
}
