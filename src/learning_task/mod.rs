//! Moderation lifecycle of learning tasks.
//!
//! Users publish learning tasks, peers and admins review them, and users
//! like them. An admin review moves a task from `under_review` to `rated`;
//! the owner reworks a task an admin sent back to `redo`. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the status state machine in [`domain`]
//! - Port contracts in [`ports`]
//! - Field validation in [`validation`]
//! - In-memory adapter implementations in [`adapters`]
//! - The lifecycle engine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod validation;

#[cfg(test)]
mod tests;
