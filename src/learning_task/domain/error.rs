//! Error taxonomy for learning task domain rules.

use super::{FrameworkId, LanguageId, TaskId, TaskOperation, TaskStatus, UserId};
use thiserror::Error;

/// Malformed input for a task or review.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("title is required")]
    EmptyTitle,

    /// The title exceeds the configured length.
    #[error("title has {actual} characters, exceeds limit of {max}")]
    TitleTooLong {
        /// Maximum allowed characters.
        max: usize,
        /// Actual character count.
        actual: usize,
    },

    /// The description is empty after trimming.
    #[error("description is required")]
    EmptyDescription,

    /// The description exceeds the configured length.
    #[error("description has {actual} characters, exceeds limit of {max}")]
    DescriptionTooLong {
        /// Maximum allowed characters.
        max: usize,
        /// Actual character count.
        actual: usize,
    },

    /// No language was selected.
    #[error("select at least one language")]
    NoLanguages,

    /// The repository link does not start with the required host prefix.
    #[error("repository link '{link}' must start with '{prefix}'")]
    RepositoryLinkPrefix {
        /// Rejected link.
        link: String,
        /// Required prefix.
        prefix: String,
    },

    /// The repository link exceeds the configured length.
    #[error("repository link has {actual} characters, exceeds limit of {max}")]
    RepositoryLinkTooLong {
        /// Maximum allowed characters.
        max: usize,
        /// Actual character count.
        actual: usize,
    },

    /// A language reference does not resolve in the catalog.
    #[error("unknown language: {0}")]
    UnknownLanguage(LanguageId),

    /// A framework reference does not resolve in the catalog.
    #[error("unknown framework: {0}")]
    UnknownFramework(FrameworkId),

    /// The rating lies outside 1..=5.
    #[error("rating {0} is out of range, expected 1 to 5")]
    RatingOutOfRange(u8),

    /// The review feedback is empty after trimming.
    #[error("feedback is required")]
    EmptyFeedback,

    /// The review feedback exceeds the configured length.
    #[error("feedback has {actual} characters, exceeds limit of {max}")]
    FeedbackTooLong {
        /// Maximum allowed characters.
        max: usize,
        /// Actual character count.
        actual: usize,
    },

    /// Several field-level failures collected from one call.
    #[error("{} validation errors: {}", .0.len(), join_messages(.0))]
    Multiple(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Combines validation errors into a single error.
    ///
    /// A single error is returned unwrapped and nested `Multiple` values are
    /// flattened. Returns `None` when `errors` is empty.
    #[must_use]
    pub fn multiple(errors: Vec<Self>) -> Option<Self> {
        let mut flattened: Vec<Self> = errors.into_iter().flat_map(Self::into_errors).collect();
        match flattened.len() {
            0 => None,
            1 => flattened.pop(),
            _ => Some(Self::Multiple(flattened)),
        }
    }

    /// Returns `true` if this error bundles several failures.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns the individual failures, unwrapping `Multiple`.
    #[must_use]
    pub fn into_errors(self) -> Vec<Self> {
        match self {
            Self::Multiple(errors) => errors,
            single => vec![single],
        }
    }

    /// Returns `true` if `other` is this error or one of its bundled errors.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        match self {
            Self::Multiple(errors) => errors.iter().any(|error| error == other),
            single => single == other,
        }
    }
}

/// The actor lacks the role or ownership an operation requires.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The operation needs an authenticated actor.
    #[error("{operation} requires an authenticated actor")]
    Unauthenticated {
        /// Rejected operation.
        operation: TaskOperation,
    },

    /// Only the task owner may perform the operation.
    #[error("only the owner of task {task_id} may {operation} it")]
    NotOwner {
        /// Target task.
        task_id: TaskId,
        /// Rejected operation.
        operation: TaskOperation,
    },

    /// Only an admin may perform the operation.
    #[error("{operation} requires the admin role")]
    AdminRequired {
        /// Rejected operation.
        operation: TaskOperation,
    },

    /// Owners may not review their own task.
    #[error("the owner of task {0} cannot review it")]
    SelfReview(TaskId),

    /// Only the review author or an admin may remove a review.
    #[error("only the author or an admin may remove the review by {reviewer} on task {task_id}")]
    NotReviewAuthor {
        /// Target task.
        task_id: TaskId,
        /// Author of the review.
        reviewer: UserId,
    },

    /// The owner has no task creations left.
    #[error("user {owner} has no learning task creations left")]
    QuotaExhausted {
        /// User whose allowance is used up.
        owner: UserId,
    },
}

/// The operation is not legal from the task's current status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IllegalStateError {
    /// No transition exists for the operation from the current status.
    #[error("cannot {operation} task {task_id} while it is {status}")]
    Transition {
        /// Target task.
        task_id: TaskId,
        /// Status at the time of the request.
        status: TaskStatus,
        /// Requested operation.
        operation: TaskOperation,
    },

    /// Private tasks cannot enter moderation.
    #[error("cannot {operation} task {task_id} because it is private")]
    NotPublic {
        /// Target task.
        task_id: TaskId,
        /// Requested operation.
        operation: TaskOperation,
    },
}

impl IllegalStateError {
    /// Returns the task the error refers to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        match self {
            Self::Transition { task_id, .. } | Self::NotPublic { task_id, .. } => *task_id,
        }
    }
}

/// Error returned while parsing task status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
