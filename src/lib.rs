//! Huddle: shared task-list collaboration engine.
//!
//! This crate provides the core functionality for managing personal task
//! boards and shared collaboration lists: membership tracking, task
//! workflow status, and the permission rules governing who may mutate what.
//!
//! # Architecture
//!
//! Huddle follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, tests, etc.)
//!
//! # Modules
//!
//! - [`identity`]: External account-store collaborator and username type
//! - [`board`]: Task records, workflow status, and board ordering
//! - [`collaboration`]: Lists, memberships, permissions, and orchestration

pub mod board;
pub mod collaboration;
pub mod identity;
