//! Port contracts for collaboration list management.
//!
//! Ports define infrastructure-agnostic interfaces used by the
//! collaboration service.

pub mod directory;

pub use directory::{MembershipDirectory, MembershipDirectoryError, MembershipDirectoryResult};
