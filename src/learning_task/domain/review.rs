//! Review records attached to learning tasks.

use super::{AuthenticatedActor, Rating, ReviewFeedback, ReviewId, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One reviewer's rating and feedback on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    task_id: TaskId,
    reviewer: UserId,
    rating: Rating,
    feedback: ReviewFeedback,
    is_admin_review: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedReviewData {
    /// Persisted review identifier.
    pub id: ReviewId,
    /// Reviewed task.
    pub task_id: TaskId,
    /// Review author.
    pub reviewer: UserId,
    /// Persisted rating.
    pub rating: Rating,
    /// Persisted feedback.
    pub feedback: ReviewFeedback,
    /// Whether the author was an admin at first submission.
    pub is_admin_review: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Creates a review, stamping the reviewer's current admin role.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        reviewer: AuthenticatedActor,
        rating: Rating,
        feedback: ReviewFeedback,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ReviewId::new(),
            task_id,
            reviewer: reviewer.id(),
            rating,
            feedback,
            is_admin_review: reviewer.is_admin(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a review from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedReviewData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            reviewer: data.reviewer,
            rating: data.rating,
            feedback: data.feedback,
            is_admin_review: data.is_admin_review,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Replaces rating and feedback. The admin flag stays as first stamped.
    pub fn revise(&mut self, rating: Rating, feedback: ReviewFeedback, clock: &impl Clock) {
        self.rating = rating;
        self.feedback = feedback;
        self.updated_at = clock.utc();
    }

    /// Returns the review identifier.
    #[must_use]
    pub const fn id(&self) -> ReviewId {
        self.id
    }

    /// Returns the reviewed task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn reviewer(&self) -> UserId {
        self.reviewer
    }

    /// Returns the rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the feedback.
    #[must_use]
    pub const fn feedback(&self) -> &ReviewFeedback {
        &self.feedback
    }

    /// Returns `true` if the author was an admin at first submission.
    #[must_use]
    pub const fn is_admin_review(&self) -> bool {
        self.is_admin_review
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
