//! Adapter implementations of the membership directory port.

pub mod memory;
pub mod postgres;
