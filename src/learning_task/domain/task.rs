//! Learning task aggregate root.

use super::{
    IllegalStateError, TaskContent, TaskEvent, TaskId, TaskOperation, TaskStatus, TaskVersion,
    UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Learning task aggregate root.
///
/// Owns its moderation status; review and like membership live in their
/// ledgers and are never cached here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTask {
    id: TaskId,
    owner: UserId,
    content: TaskContent,
    status: TaskStatus,
    version: TaskVersion,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owner.
    pub owner: UserId,
    /// Persisted content.
    pub content: TaskContent,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted concurrency token.
    pub version: TaskVersion,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl LearningTask {
    /// Creates a new draft owned by `owner`.
    #[must_use]
    pub fn new(owner: UserId, content: TaskContent, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            owner,
            content,
            status: TaskStatus::Draft,
            version: TaskVersion::INITIAL,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            content: data.content,
            status: data.status,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the owner-editable content.
    #[must_use]
    pub const fn content(&self) -> &TaskContent {
        &self.content
    }

    /// Returns the moderation status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the optimistic concurrency token.
    #[must_use]
    pub const fn version(&self) -> TaskVersion {
        self.version
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the content while the task is editable.
    ///
    /// The status is left unchanged; a task in `redo` stays there until the
    /// owner resubmits it.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError::Transition`] outside `draft` and `redo`.
    pub fn replace_content(
        &mut self,
        content: TaskContent,
        clock: &impl Clock,
    ) -> Result<(), IllegalStateError> {
        self.ensure_editable()?;
        self.content = content;
        self.touch(clock);
        Ok(())
    }

    /// Checks that the content may be edited in the current status.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError::Transition`] outside `draft` and `redo`.
    pub const fn ensure_editable(&self) -> Result<(), IllegalStateError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(self.illegal(TaskOperation::Edit))
        }
    }

    /// Checks that the owner may delete the task in the current status.
    ///
    /// Admins may delete in any status and skip this check.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError::Transition`] outside `draft` and `redo`.
    pub const fn ensure_owner_deletable(&self) -> Result<(), IllegalStateError> {
        if self.status.is_owner_deletable() {
            Ok(())
        } else {
            Err(self.illegal(TaskOperation::Delete))
        }
    }

    /// Moves a public draft into moderation.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError::Transition`] outside `draft`, or
    /// [`IllegalStateError::NotPublic`] for private tasks.
    pub fn submit(&mut self, clock: &impl Clock) -> Result<(), IllegalStateError> {
        self.enter_moderation(TaskEvent::Submit, clock)
    }

    /// Moves a reworked task back into moderation.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError::Transition`] outside `redo`, or
    /// [`IllegalStateError::NotPublic`] for private tasks.
    pub fn resubmit(&mut self, clock: &impl Clock) -> Result<(), IllegalStateError> {
        self.enter_moderation(TaskEvent::Resubmit, clock)
    }

    /// Sends a rated task back to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalStateError::Transition`] outside `rated`.
    pub fn request_redo(&mut self, clock: &impl Clock) -> Result<(), IllegalStateError> {
        self.apply(TaskEvent::RequestRedo, clock)
    }

    /// Applies the effect of an admin review being recorded.
    ///
    /// Returns `true` when the task moved from `under_review` to `rated`.
    /// Any other status is left untouched.
    pub fn record_admin_review(&mut self, clock: &impl Clock) -> bool {
        self.apply(TaskEvent::AdminReviewRecorded, clock).is_ok()
    }

    /// Applies the effect of the last admin review being removed.
    ///
    /// Returns `true` when the task moved from `rated` back to
    /// `under_review`. Any other status is left untouched.
    pub fn withdraw_admin_reviews(&mut self, clock: &impl Clock) -> bool {
        self.apply(TaskEvent::AdminReviewsWithdrawn, clock).is_ok()
    }

    fn enter_moderation(
        &mut self,
        event: TaskEvent,
        clock: &impl Clock,
    ) -> Result<(), IllegalStateError> {
        if self.status.next(event).is_none() {
            return Err(self.illegal(event.operation()));
        }
        if !self.content.is_public() {
            return Err(IllegalStateError::NotPublic {
                task_id: self.id,
                operation: event.operation(),
            });
        }
        self.apply(event, clock)
    }

    fn apply(&mut self, event: TaskEvent, clock: &impl Clock) -> Result<(), IllegalStateError> {
        let next = self
            .status
            .next(event)
            .ok_or_else(|| self.illegal(event.operation()))?;
        self.status = next;
        self.touch(clock);
        Ok(())
    }

    const fn illegal(&self, operation: TaskOperation) -> IllegalStateError {
        IllegalStateError::Transition {
            task_id: self.id,
            status: self.status,
            operation,
        }
    }

    /// Bumps `updated_at` and the concurrency token.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.next();
    }
}
