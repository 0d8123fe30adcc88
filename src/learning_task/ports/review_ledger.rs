//! Review Ledger port: one review per `(task, reviewer)`.

use crate::learning_task::domain::{Review, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for review ledger operations.
pub type ReviewLedgerResult<T> = Result<T, ReviewLedgerError>;

/// Review persistence contract keyed by `(task, reviewer)`.
#[async_trait]
pub trait ReviewLedger: Send + Sync {
    /// Inserts a review for a `(task, reviewer)` pair that has none.
    ///
    /// The uniqueness check and the insert happen atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewLedgerError::DuplicateReview`] when the pair already
    /// has a review.
    async fn insert(&self, review: &Review) -> ReviewLedgerResult<()>;

    /// Replaces the existing review of the same `(task, reviewer)` pair,
    /// keeping its position in the listing order.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewLedgerError::NotFound`] when the pair has no review.
    async fn replace(&self, review: &Review) -> ReviewLedgerResult<()>;

    /// Finds the review a user left on a task.
    async fn find(&self, task_id: TaskId, reviewer: UserId) -> ReviewLedgerResult<Option<Review>>;

    /// Removes and returns the review a user left on a task together with
    /// its listing position.
    ///
    /// Returns `None` when the pair has no review.
    async fn remove(
        &self,
        task_id: TaskId,
        reviewer: UserId,
    ) -> ReviewLedgerResult<Option<RemovedReview>>;

    /// Puts a removed review back at the position it was removed from.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewLedgerError::DuplicateReview`] when the pair has
    /// received a new review in the meantime.
    async fn restore(&self, removed: &RemovedReview) -> ReviewLedgerResult<()>;

    /// Returns a task's reviews, newest first.
    ///
    /// Reviews sharing a creation timestamp are ordered by insertion, the
    /// later insertion first.
    async fn list_for_task(&self, task_id: TaskId) -> ReviewLedgerResult<Vec<Review>>;

    /// Removes every review of a task and returns them with their positions.
    async fn remove_all_for_task(&self, task_id: TaskId)
    -> ReviewLedgerResult<Vec<RemovedReview>>;
}

/// Opaque insertion position of a review within its ledger.
///
/// Only meaningful to the ledger that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerPosition(u64);

impl LedgerPosition {
    /// Wraps a ledger-specific insertion counter.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw insertion counter.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// A review taken out of the ledger, with the position it held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedReview {
    /// The removed review.
    pub review: Review,
    /// Where the review sat in the listing order.
    pub position: LedgerPosition,
}

/// Errors returned by review ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum ReviewLedgerError {
    /// The `(task, reviewer)` pair already has a review.
    #[error("user {reviewer} already reviewed task {task_id}")]
    DuplicateReview {
        /// Reviewed task.
        task_id: TaskId,
        /// Review author.
        reviewer: UserId,
    },

    /// The `(task, reviewer)` pair has no review.
    #[error("no review by {reviewer} on task {task_id}")]
    NotFound {
        /// Reviewed task.
        task_id: TaskId,
        /// Review author.
        reviewer: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
