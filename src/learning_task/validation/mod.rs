//! Validation of owner and reviewer input.
//!
//! - [`rules`]: individual field rules
//! - [`service`]: the default [`TaskContentValidator`] implementation
//!
//! [`TaskContentValidator`]: crate::learning_task::ports::TaskContentValidator

pub mod rules;
pub mod service;

pub use service::DefaultTaskValidator;
