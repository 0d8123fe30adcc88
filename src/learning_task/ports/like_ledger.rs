//! Like Ledger port: `(user, task)` membership.

use crate::learning_task::domain::{LikeToggle, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for like ledger operations.
pub type LikeLedgerResult<T> = Result<T, LikeLedgerError>;

/// Like membership contract.
#[async_trait]
pub trait LikeLedger: Send + Sync {
    /// Flips the `(user, task)` membership and reports the resulting count.
    ///
    /// The membership check, the flip, and the count happen atomically so
    /// concurrent toggles from different users never lose an update.
    async fn toggle(&self, task_id: TaskId, user: UserId) -> LikeLedgerResult<LikeToggle>;

    /// Returns `true` when `user` likes the task.
    async fn contains(&self, task_id: TaskId, user: UserId) -> LikeLedgerResult<bool>;

    /// Returns the number of users liking the task.
    async fn count(&self, task_id: TaskId) -> LikeLedgerResult<u64>;

    /// Removes every like of a task and returns the users who liked it.
    async fn remove_all_for_task(&self, task_id: TaskId) -> LikeLedgerResult<Vec<UserId>>;

    /// Records likes of a task by `users`; users already liking it are
    /// left as they are.
    async fn restore_all(&self, task_id: TaskId, users: &[UserId]) -> LikeLedgerResult<()>;
}

/// Errors returned by like ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum LikeLedgerError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LikeLedgerError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
