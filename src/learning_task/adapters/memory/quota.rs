//! In-memory task creation quota.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::learning_task::{
    domain::UserId,
    ports::{QuotaError, QuotaResult, TaskQuota},
};

/// Thread-safe in-memory quota.
///
/// Users without an explicit limit fall back to the default limit; `None`
/// means unlimited.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskQuota {
    state: Arc<RwLock<QuotaState>>,
}

#[derive(Debug, Default)]
struct QuotaState {
    default_limit: Option<u32>,
    remaining: HashMap<UserId, u32>,
}

impl InMemoryTaskQuota {
    /// Creates a quota that never runs out.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Creates a quota granting every user `limit` creations.
    #[must_use]
    pub fn with_default_limit(limit: u32) -> Self {
        Self {
            state: Arc::new(RwLock::new(QuotaState {
                default_limit: Some(limit),
                remaining: HashMap::new(),
            })),
        }
    }

    /// Sets the remaining creations for one user.
    ///
    /// # Errors
    ///
    /// Returns [`QuotaError::Persistence`] if the quota lock is poisoned.
    pub fn set_remaining(&self, owner: UserId, remaining: u32) -> QuotaResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.remaining.insert(owner, remaining);
        Ok(())
    }
}

fn lock_error(err: impl std::fmt::Display) -> QuotaError {
    QuotaError::persistence(std::io::Error::other(err.to_string()))
}

impl QuotaState {
    fn remaining_for(&self, owner: UserId) -> Option<u32> {
        self.remaining
            .get(&owner)
            .copied()
            .or(self.default_limit)
    }
}

#[async_trait]
impl TaskQuota for InMemoryTaskQuota {
    async fn reserve(&self, owner: UserId) -> QuotaResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(remaining) = state.remaining_for(owner) else {
            return Ok(());
        };
        if remaining == 0 {
            return Err(QuotaError::Exhausted(owner));
        }
        state.remaining.insert(owner, remaining - 1);
        Ok(())
    }

    async fn release(&self, owner: UserId) -> QuotaResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(remaining) = state.remaining_for(owner) {
            state.remaining.insert(owner, remaining.saturating_add(1));
        }
        Ok(())
    }

    async fn remaining(&self, owner: UserId) -> QuotaResult<Option<u32>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.remaining_for(owner))
    }
}
