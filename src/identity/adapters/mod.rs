//! Adapter implementations of the identity store port.

pub mod memory;
