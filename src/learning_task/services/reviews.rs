//! Review operations and their effect on the moderation status.

use super::{
    error::{LifecycleResult, NotFoundError},
    lifecycle::TaskLifecycleEngine,
    requests::ReviewRequest,
};
use crate::learning_task::{
    domain::{Actor, AverageRating, Review, TaskId, TaskOperation, TaskStatus, UserId},
    ports::{
        CatalogLookup, LikeLedger, RemovedReview, ReviewLedger, TaskContentValidator, TaskQuota,
        TaskRepository,
    },
};
use mockable::Clock;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Result of [`TaskLifecycleEngine::upsert_review`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    /// The stored review.
    pub review: Review,
    /// `true` when the review was inserted rather than updated.
    pub created: bool,
    /// Task status after the operation.
    pub status: TaskStatus,
}

/// Result of [`TaskLifecycleEngine::delete_review`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRemoval {
    /// The review that was removed.
    pub review: Review,
    /// Task status after the operation.
    pub status: TaskStatus,
}

impl<T, R, L, K, Q, C> TaskLifecycleEngine<T, R, L, K, Q, C>
where
    T: TaskRepository,
    R: ReviewLedger,
    L: LikeLedger,
    K: CatalogLookup,
    Q: TaskQuota,
    C: Clock + Send + Sync,
{
    /// Inserts or updates the actor's review of a task.
    ///
    /// An admin review recorded while the task is `under_review` rates it.
    /// The review write and the status change land together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] for anonymous
    /// callers and for the task owner, [`super::LifecycleError::Validation`]
    /// for the first invalid field, and [`super::LifecycleError::NotFound`]
    /// for unknown or invisible tasks.
    pub async fn upsert_review(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: &ReviewRequest,
    ) -> LifecycleResult<ReviewOutcome> {
        self.retrying(TaskOperation::UpsertReview, task_id, move || {
            self.try_upsert_review(actor, task_id, request)
        })
        .await
    }

    async fn try_upsert_review(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: &ReviewRequest,
    ) -> LifecycleResult<ReviewOutcome> {
        let _guard = self.locks.acquire(task_id).await;
        let (mut task, access) = self
            .load_visible(actor, task_id, TaskOperation::UpsertReview)
            .await?;
        access.require_reviewer()?;
        let (rating, feedback) = self
            .validator
            .validate_review(request.rating(), request.feedback())?;

        let reviewer = access.actor();
        let previous = self.reviews.find(task_id, reviewer.id()).await?;
        let review = match &previous {
            Some(existing) => {
                let mut revised = existing.clone();
                revised.revise(rating, feedback, &*self.clock);
                self.reviews.replace(&revised).await?;
                revised
            }
            None => {
                let created = Review::new(task_id, reviewer, rating, feedback, &*self.clock);
                self.reviews.insert(&created).await?;
                created
            }
        };
        debug!(
            task_id = %task_id,
            reviewer = %reviewer,
            rating = review.rating().value(),
            created = previous.is_none(),
            "review recorded"
        );

        let expected = task.version();
        if review.is_admin_review() && task.record_admin_review(&*self.clock) {
            if let Err(err) = self.tasks.update(&task, expected).await {
                self.undo_review_write(&review, previous.as_ref()).await;
                return Err(err.into());
            }
            info!(
                task_id = %task_id,
                actor = %reviewer,
                from = %TaskStatus::UnderReview,
                to = %task.status(),
                "learning task status changed"
            );
        }

        Ok(ReviewOutcome {
            review,
            created: previous.is_none(),
            status: task.status(),
        })
    }

    /// Removes `reviewer`'s review of a task.
    ///
    /// Removing the last admin review of a `rated` task moves it back to
    /// `under_review`.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] unless the actor is
    /// the review's author or an admin, and
    /// [`super::LifecycleError::NotFound`] when the task or review is
    /// missing.
    pub async fn delete_review(
        &self,
        actor: &Actor,
        task_id: TaskId,
        reviewer: UserId,
    ) -> LifecycleResult<ReviewRemoval> {
        self.retrying(TaskOperation::DeleteReview, task_id, move || {
            self.try_delete_review(actor, task_id, reviewer)
        })
        .await
    }

    async fn try_delete_review(
        &self,
        actor: &Actor,
        task_id: TaskId,
        reviewer: UserId,
    ) -> LifecycleResult<ReviewRemoval> {
        let _guard = self.locks.acquire(task_id).await;
        let mut task = self.load_task(task_id).await?;
        let access = actor.access(&task, TaskOperation::DeleteReview)?;
        access.require_review_author_or_admin(reviewer)?;

        let reviews = self.reviews.list_for_task(task_id).await?;
        let other_admin_review = reviews
            .iter()
            .any(|review| review.is_admin_review() && review.reviewer() != reviewer);

        let removed = self
            .reviews
            .remove(task_id, reviewer)
            .await?
            .ok_or(NotFoundError::Review { task_id, reviewer })?;
        let target = &removed.review;
        debug!(
            task_id = %task_id,
            reviewer = %reviewer,
            actor = %access.actor(),
            "review removed"
        );

        let expected = task.version();
        if target.is_admin_review()
            && !other_admin_review
            && task.withdraw_admin_reviews(&*self.clock)
        {
            if let Err(err) = self.tasks.update(&task, expected).await {
                self.restore_review(&removed).await;
                return Err(err.into());
            }
            info!(
                task_id = %task_id,
                actor = %access.actor(),
                from = %TaskStatus::Rated,
                to = %task.status(),
                "learning task status changed"
            );
        }

        Ok(ReviewRemoval {
            review: removed.review,
            status: task.status(),
        })
    }

    /// Returns the exact mean rating over every review of a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::NotFound`] for unknown tasks.
    pub async fn average_rating(&self, task_id: TaskId) -> LifecycleResult<AverageRating> {
        self.load_task(task_id).await?;
        let reviews = self.reviews.list_for_task(task_id).await?;
        Ok(AverageRating::from_reviews(&reviews))
    }

    /// Reverts a review write whose status change could not be stored.
    async fn undo_review_write(&self, written: &Review, previous: Option<&Review>) {
        let result = match previous {
            Some(original) => self.reviews.replace(original).await,
            None => self
                .reviews
                .remove(written.task_id(), written.reviewer())
                .await
                .map(|_| ()),
        };
        match result {
            Ok(()) => warn!(
                task_id = %written.task_id(),
                reviewer = %written.reviewer(),
                "review write reverted after failed status update"
            ),
            Err(err) => error!(
                task_id = %written.task_id(),
                reviewer = %written.reviewer(),
                error = %err,
                "failed to revert review write"
            ),
        }
    }

    /// Puts a removed review back in place when its status change could
    /// not be stored.
    async fn restore_review(&self, removed: &RemovedReview) {
        let review = &removed.review;
        match self.reviews.restore(removed).await {
            Ok(()) => warn!(
                task_id = %review.task_id(),
                reviewer = %review.reviewer(),
                "review removal reverted after failed status update"
            ),
            Err(err) => error!(
                task_id = %review.task_id(),
                reviewer = %review.reviewer(),
                error = %err,
                "failed to restore removed review"
            ),
        }
    }
}
