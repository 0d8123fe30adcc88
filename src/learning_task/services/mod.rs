//! Application services for learning task moderation.
//!
//! [`TaskLifecycleEngine`] is the single entry point for every mutation;
//! each operation is split across sibling modules by concern.

mod config;
mod error;
mod lifecycle;
mod likes;
mod locks;
mod requests;
mod reviews;
mod view;

pub use config::LifecycleConfig;
pub use error::{
    ConflictError, LifecycleError, LifecycleErrorKind, LifecycleResult, NotFoundError,
};
pub use lifecycle::TaskLifecycleEngine;
pub use requests::{CreateTaskRequest, EditTaskRequest, ReviewRequest};
pub use reviews::{ReviewOutcome, ReviewRemoval};
pub use view::TaskView;
