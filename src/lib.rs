//! Assay: moderation lifecycle for community learning tasks.
//!
//! Users publish coding exercises with a repository link, other users and
//! admins review them, and anyone signed in can like them. The crate owns
//! the task status state machine and keeps every task's reviews, likes, and
//! status mutually consistent under concurrent requests.
//!
//! # Architecture
//!
//! Assay follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage, catalog, and quota
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`learning_task`]: Tasks, reviews, likes, and the lifecycle engine

pub mod learning_task;
