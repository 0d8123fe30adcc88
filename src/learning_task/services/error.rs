//! Service-level error taxonomy for the lifecycle engine.

use crate::learning_task::{
    domain::{AuthorizationError, IllegalStateError, TaskId, TaskVersion, UserId, ValidationError},
    ports::{CatalogError, LikeLedgerError, QuotaError, ReviewLedgerError, TaskRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;

/// A task or review the caller referenced does not exist.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotFoundError {
    /// No task with this identifier, or not visible to the caller.
    #[error("task not found: {0}")]
    Task(TaskId),

    /// No review by this user on the task.
    #[error("no review by {reviewer} on task {task_id}")]
    Review {
        /// Reviewed task.
        task_id: TaskId,
        /// Review author.
        reviewer: UserId,
    },
}

/// A concurrent write violated a uniqueness or version invariant.
///
/// The caller should re-read and retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConflictError {
    /// The task changed between read and write.
    #[error("task {task_id} was modified concurrently (expected {expected}, found {actual})")]
    TaskVersion {
        /// Contended task.
        task_id: TaskId,
        /// Version the writer read.
        expected: TaskVersion,
        /// Version found at write time.
        actual: TaskVersion,
    },

    /// Another review for the same `(task, reviewer)` was inserted first.
    #[error("a review by {reviewer} on task {task_id} was recorded concurrently")]
    DuplicateReview {
        /// Reviewed task.
        task_id: TaskId,
        /// Review author.
        reviewer: UserId,
    },

    /// A task with the same identifier was stored concurrently.
    #[error("task {0} was stored concurrently")]
    DuplicateTask(TaskId),
}

/// Coarse classification for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleErrorKind {
    /// Malformed input.
    Validation,
    /// Missing role or ownership.
    Authorization,
    /// Operation not legal from the current status.
    IllegalState,
    /// Referenced record does not exist.
    NotFound,
    /// Concurrent write; retry the read-modify-write.
    Conflict,
    /// Infrastructure failure.
    Persistence,
}

/// Errors returned by lifecycle engine operations.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The actor is not allowed to perform the operation.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    /// The operation is not legal from the current status.
    #[error(transparent)]
    IllegalState(#[from] IllegalStateError),
    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    /// A concurrent write won.
    #[error(transparent)]
    Conflict(#[from] ConflictError),
    /// A port failed for infrastructure reasons.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LifecycleError {
    /// Returns the error's classification.
    #[must_use]
    pub const fn kind(&self) -> LifecycleErrorKind {
        match self {
            Self::Validation(_) => LifecycleErrorKind::Validation,
            Self::Authorization(_) => LifecycleErrorKind::Authorization,
            Self::IllegalState(_) => LifecycleErrorKind::IllegalState,
            Self::NotFound(_) => LifecycleErrorKind::NotFound,
            Self::Conflict(_) => LifecycleErrorKind::Conflict,
            Self::Persistence(_) => LifecycleErrorKind::Persistence,
        }
    }

    /// Returns `true` for errors the engine may retry internally.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<TaskRepositoryError> for LifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => NotFoundError::Task(task_id).into(),
            TaskRepositoryError::DuplicateTask(task_id) => {
                ConflictError::DuplicateTask(task_id).into()
            }
            TaskRepositoryError::VersionConflict {
                task_id,
                expected,
                actual,
            } => ConflictError::TaskVersion {
                task_id,
                expected,
                actual,
            }
            .into(),
            TaskRepositoryError::Persistence(source) => Self::Persistence(source),
        }
    }
}

impl From<ReviewLedgerError> for LifecycleError {
    fn from(err: ReviewLedgerError) -> Self {
        match err {
            ReviewLedgerError::DuplicateReview { task_id, reviewer } => {
                ConflictError::DuplicateReview { task_id, reviewer }.into()
            }
            ReviewLedgerError::NotFound { task_id, reviewer } => {
                NotFoundError::Review { task_id, reviewer }.into()
            }
            ReviewLedgerError::Persistence(source) => Self::Persistence(source),
        }
    }
}

impl From<LikeLedgerError> for LifecycleError {
    fn from(err: LikeLedgerError) -> Self {
        match err {
            LikeLedgerError::Persistence(source) => Self::Persistence(source),
        }
    }
}

impl From<CatalogError> for LifecycleError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Unavailable(source) => Self::Persistence(source),
        }
    }
}

impl From<QuotaError> for LifecycleError {
    fn from(err: QuotaError) -> Self {
        match err {
            QuotaError::Exhausted(owner) => AuthorizationError::QuotaExhausted { owner }.into(),
            QuotaError::Persistence(source) => Self::Persistence(source),
        }
    }
}

/// Result type for lifecycle engine operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
