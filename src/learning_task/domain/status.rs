//! Moderation status state machine for learning tasks.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Moderation status of a learning task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created by the owner and not yet submitted.
    Draft,
    /// Submitted and waiting for an admin review.
    UnderReview,
    /// Reviewed by at least one admin.
    Rated,
    /// Sent back to the owner for rework.
    Redo,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Draft, Self::UnderReview, Self::Rated, Self::Redo];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::UnderReview => "under_review",
            Self::Rated => "rated",
            Self::Redo => "redo",
        }
    }

    /// Returns the status reached by applying `event`, if the edge exists.
    #[must_use]
    pub const fn next(self, event: TaskEvent) -> Option<Self> {
        match (self, event) {
            (Self::Draft, TaskEvent::Submit) | (Self::Redo, TaskEvent::Resubmit) => {
                Some(Self::UnderReview)
            }
            (Self::UnderReview, TaskEvent::AdminReviewRecorded) => Some(Self::Rated),
            (Self::Rated, TaskEvent::AdminReviewsWithdrawn) => Some(Self::UnderReview),
            (Self::Rated, TaskEvent::RequestRedo) => Some(Self::Redo),
            _ => None,
        }
    }

    /// Returns `true` when the owner may change field content.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Redo)
    }

    /// Returns `true` when the owner (without admin rights) may delete the task.
    #[must_use]
    pub const fn is_owner_deletable(self) -> bool {
        self.is_editable()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "under_review" => Ok(Self::UnderReview),
            "rated" => Ok(Self::Rated),
            "redo" => Ok(Self::Redo),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Event driving a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskEvent {
    /// Owner submits a draft for moderation.
    Submit,
    /// An admin review was inserted or updated.
    AdminReviewRecorded,
    /// The last admin review of a rated task was removed.
    AdminReviewsWithdrawn,
    /// An admin sends a rated task back for rework.
    RequestRedo,
    /// Owner resubmits a reworked task.
    Resubmit,
}

impl TaskEvent {
    /// Returns the operation reported when the event is rejected.
    #[must_use]
    pub const fn operation(self) -> TaskOperation {
        match self {
            Self::Submit => TaskOperation::Submit,
            Self::AdminReviewRecorded => TaskOperation::UpsertReview,
            Self::AdminReviewsWithdrawn => TaskOperation::DeleteReview,
            Self::RequestRedo => TaskOperation::RequestRedo,
            Self::Resubmit => TaskOperation::Resubmit,
        }
    }
}

/// Operations exposed by the lifecycle engine, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOperation {
    /// Create a task.
    Create,
    /// Edit task content.
    Edit,
    /// Delete a task.
    Delete,
    /// Submit a draft.
    Submit,
    /// Resubmit after redo.
    Resubmit,
    /// Send a rated task back for rework.
    RequestRedo,
    /// Create or update a review.
    UpsertReview,
    /// Remove a review.
    DeleteReview,
    /// Toggle a like.
    ToggleLike,
    /// Read a task.
    View,
}

impl TaskOperation {
    /// Returns a human-readable verb phrase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Submit => "submit",
            Self::Resubmit => "resubmit",
            Self::RequestRedo => "request redo for",
            Self::UpsertReview => "review",
            Self::DeleteReview => "remove a review from",
            Self::ToggleLike => "like",
            Self::View => "view",
        }
    }
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
