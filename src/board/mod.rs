//! Task board management for Huddle.
//!
//! A task lives in exactly one scope: a single user's personal board or a
//! shared collaboration list. Tasks move through a three-state workflow
//! (backlog, in-progress, completed) with no transition restrictions, and
//! every status bucket is presented in a fixed board order. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
