//! Collaboration list management for Huddle.
//!
//! A collaboration list is a named, owned, shared task list with an
//! explicit member set. This module owns the membership directory, the
//! pure permission rules deciding who may mutate what, and the
//! orchestration service that composes the directory, the task board, and
//! the identity store into the list lifecycle. The module follows
//! hexagonal architecture:
//!
//! - Domain types and permission rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
