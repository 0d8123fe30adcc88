//! Step definitions for learning task moderation scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
