//! In-memory Like Ledger.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::learning_task::{
    domain::{LikeAction, LikeToggle, TaskId, UserId},
    ports::{LikeLedger, LikeLedgerError, LikeLedgerResult},
};

/// Thread-safe in-memory like ledger.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLikeLedger {
    state: Arc<RwLock<HashMap<TaskId, HashSet<UserId>>>>,
}

impl InMemoryLikeLedger {
    /// Creates an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> LikeLedgerError {
    LikeLedgerError::persistence(std::io::Error::other(err.to_string()))
}

fn member_count(users: &HashSet<UserId>) -> u64 {
    u64::try_from(users.len()).unwrap_or(u64::MAX)
}

#[async_trait]
impl LikeLedger for InMemoryLikeLedger {
    async fn toggle(&self, task_id: TaskId, user: UserId) -> LikeLedgerResult<LikeToggle> {
        let mut state = self.state.write().map_err(lock_error)?;
        let users = state.entry(task_id).or_default();
        let action = if users.remove(&user) {
            LikeAction::Unliked
        } else {
            users.insert(user);
            LikeAction::Liked
        };
        let count = member_count(users);
        if users.is_empty() {
            state.remove(&task_id);
        }
        Ok(LikeToggle { action, count })
    }

    async fn contains(&self, task_id: TaskId, user: UserId) -> LikeLedgerResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&task_id).is_some_and(|users| users.contains(&user)))
    }

    async fn count(&self, task_id: TaskId) -> LikeLedgerResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&task_id).map_or(0, member_count))
    }

    async fn remove_all_for_task(&self, task_id: TaskId) -> LikeLedgerResult<Vec<UserId>> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state
            .remove(&task_id)
            .map(|users| users.into_iter().collect())
            .unwrap_or_default())
    }

    async fn restore_all(&self, task_id: TaskId, users: &[UserId]) -> LikeLedgerResult<()> {
        if users.is_empty() {
            return Ok(());
        }
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .entry(task_id)
            .or_default()
            .extend(users.iter().copied());
        Ok(())
    }
}
