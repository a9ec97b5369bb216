//! Domain model for collaboration lists and memberships.
//!
//! The collaboration domain models list creation, the owner-is-always-a-
//! member invariant, membership records, and the authorization rules, while
//! keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod ids;
mod list;
pub mod permissions;

pub use error::CollaborationDomainError;
pub use ids::ListId;
pub use list::{CollaborationList, ListName, Membership, PersistedListData};
