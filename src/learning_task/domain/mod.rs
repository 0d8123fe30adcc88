//! Domain model for learning task moderation.
//!
//! Covers the task aggregate and its status state machine, review records,
//! like outcomes, derived rating figures, and the capability-tagged actor.
//! Infrastructure concerns stay outside this boundary.

mod actor;
mod content;
mod error;
mod ids;
mod projection;
mod review;
mod status;
mod task;

pub use actor::{Actor, AuthenticatedActor, Ownership, Role, TaskAccess};
pub use content::{
    Rating, RepositoryLink, ReviewFeedback, TaskContent, TaskDescription, TaskTitle,
};
pub use error::{AuthorizationError, IllegalStateError, ParseTaskStatusError, ValidationError};
pub use ids::{FrameworkId, LanguageId, ReviewId, TaskId, TaskVersion, UserId};
pub use projection::{AverageRating, LikeAction, LikeToggle};
pub use review::{PersistedReviewData, Review};
pub use status::{TaskEvent, TaskOperation, TaskStatus};
pub use task::{LearningTask, PersistedTaskData};
