//! External identity-store collaborator.
//!
//! Account registration, login, password handling, and session resolution
//! all live outside this crate. The collaboration core only ever asks the
//! account store one question: does this username exist? The authenticated
//! actor arrives as an explicit [`domain::Username`] argument on every
//! service call, so no process-wide session state exists here.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
