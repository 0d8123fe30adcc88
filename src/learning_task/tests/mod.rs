//! Unit tests for learning task moderation.

mod status_tests;
mod support;
