//! Per-user allowance of task creations.

use crate::learning_task::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for quota operations.
pub type QuotaResult<T> = Result<T, QuotaError>;

/// Task creation allowance contract.
///
/// Creating a task consumes one unit from its owner; deleting a task gives
/// the unit back.
#[async_trait]
pub trait TaskQuota: Send + Sync {
    /// Consumes one creation unit for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::Exhausted`] when no units remain.
    async fn reserve(&self, owner: UserId) -> QuotaResult<()>;

    /// Returns one creation unit to `owner`.
    async fn release(&self, owner: UserId) -> QuotaResult<()>;

    /// Returns the units left for `owner`, or `None` when unlimited.
    async fn remaining(&self, owner: UserId) -> QuotaResult<Option<u32>>;
}

/// Errors returned by quota implementations.
#[derive(Debug, Clone, Error)]
pub enum QuotaError {
    /// The owner has no creation units left.
    #[error("user {0} has no task creations left")]
    Exhausted(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl QuotaError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
