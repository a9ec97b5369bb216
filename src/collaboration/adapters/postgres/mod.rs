//! `PostgreSQL` adapters for collaboration list persistence.

mod models;
mod repository;
mod schema;

pub use repository::{CollabPgPool, PostgresMembershipDirectory};
