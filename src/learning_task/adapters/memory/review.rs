//! In-memory Review Ledger.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::learning_task::{
    domain::{Review, TaskId, UserId},
    ports::{
        LedgerPosition, RemovedReview, ReviewLedger, ReviewLedgerError, ReviewLedgerResult,
    },
};

/// Thread-safe in-memory review ledger indexed by task, then reviewer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewLedger {
    state: Arc<RwLock<InMemoryReviewState>>,
}

#[derive(Debug, Default)]
struct InMemoryReviewState {
    by_task: HashMap<TaskId, HashMap<UserId, LedgerEntry>>,
    next_sequence: u64,
}

#[derive(Debug, Clone)]
struct LedgerEntry {
    review: Review,
    sequence: u64,
}

impl InMemoryReviewLedger {
    /// Creates an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ReviewLedgerError {
    ReviewLedgerError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ReviewLedger for InMemoryReviewLedger {
    async fn insert(&self, review: &Review) -> ReviewLedgerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let sequence = state.next_sequence;
        let reviews = state.by_task.entry(review.task_id()).or_default();
        if reviews.contains_key(&review.reviewer()) {
            return Err(ReviewLedgerError::DuplicateReview {
                task_id: review.task_id(),
                reviewer: review.reviewer(),
            });
        }
        reviews.insert(
            review.reviewer(),
            LedgerEntry {
                review: review.clone(),
                sequence,
            },
        );
        state.next_sequence = sequence.saturating_add(1);
        Ok(())
    }

    async fn replace(&self, review: &Review) -> ReviewLedgerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let entry = state
            .by_task
            .get_mut(&review.task_id())
            .and_then(|reviews| reviews.get_mut(&review.reviewer()))
            .ok_or(ReviewLedgerError::NotFound {
                task_id: review.task_id(),
                reviewer: review.reviewer(),
            })?;
        entry.review = review.clone();
        Ok(())
    }

    async fn find(&self, task_id: TaskId, reviewer: UserId) -> ReviewLedgerResult<Option<Review>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .by_task
            .get(&task_id)
            .and_then(|reviews| reviews.get(&reviewer))
            .map(|entry| entry.review.clone()))
    }

    async fn remove(
        &self,
        task_id: TaskId,
        reviewer: UserId,
    ) -> ReviewLedgerResult<Option<RemovedReview>> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(reviews) = state.by_task.get_mut(&task_id) else {
            return Ok(None);
        };
        let removed = reviews.remove(&reviewer).map(|entry| RemovedReview {
            review: entry.review,
            position: LedgerPosition::new(entry.sequence),
        });
        if reviews.is_empty() {
            state.by_task.remove(&task_id);
        }
        Ok(removed)
    }

    async fn restore(&self, removed: &RemovedReview) -> ReviewLedgerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let review = &removed.review;
        let reviews = state.by_task.entry(review.task_id()).or_default();
        if reviews.contains_key(&review.reviewer()) {
            return Err(ReviewLedgerError::DuplicateReview {
                task_id: review.task_id(),
                reviewer: review.reviewer(),
            });
        }
        reviews.insert(
            review.reviewer(),
            LedgerEntry {
                review: review.clone(),
                sequence: removed.position.value(),
            },
        );
        Ok(())
    }

    async fn list_for_task(&self, task_id: TaskId) -> ReviewLedgerResult<Vec<Review>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut entries: Vec<LedgerEntry> = state
            .by_task
            .get(&task_id)
            .map(|reviews| reviews.values().cloned().collect())
            .unwrap_or_default();
        entries.sort_by_key(|entry| (Reverse(entry.review.created_at()), Reverse(entry.sequence)));
        Ok(entries.into_iter().map(|entry| entry.review).collect())
    }

    async fn remove_all_for_task(
        &self,
        task_id: TaskId,
    ) -> ReviewLedgerResult<Vec<RemovedReview>> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(reviews) = state.by_task.remove(&task_id) else {
            return Ok(Vec::new());
        };
        Ok(reviews
            .into_values()
            .map(|entry| RemovedReview {
                review: entry.review,
                position: LedgerPosition::new(entry.sequence),
            })
            .collect())
    }
}
