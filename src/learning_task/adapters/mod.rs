//! Adapter implementations for learning task ports.

pub mod memory;
