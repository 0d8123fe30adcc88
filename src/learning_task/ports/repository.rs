//! Task Store port: persistence and lookup of learning tasks.

use crate::learning_task::domain::{
    FrameworkId, LanguageId, LearningTask, TaskId, TaskStatus, TaskVersion, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Writes to existing tasks carry the version the caller read; a mismatch
/// means another writer got there first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the identifier
    /// already exists.
    async fn store(&self, task: &LearningTask) -> TaskRepositoryResult<()>;

    /// Replaces a stored task if its stored version equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::VersionConflict`] when the stored version
    /// differs from `expected`.
    async fn update(&self, task: &LearningTask, expected: TaskVersion)
    -> TaskRepositoryResult<()>;

    /// Removes a stored task if its stored version equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::VersionConflict`] when the stored version
    /// differs from `expected`.
    async fn remove(&self, id: TaskId, expected: TaskVersion) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<LearningTask>>;

    /// Returns tasks matching `query`, newest first.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<LearningTask>>;
}

/// Filter for task listings. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Only tasks created by this user.
    pub owner: Option<UserId>,
    /// Only public (`true`) or private (`false`) tasks.
    pub is_public: Option<bool>,
    /// Only tasks in this status.
    pub status: Option<TaskStatus>,
    /// Only tasks referencing this language.
    pub language: Option<LanguageId>,
    /// Only tasks referencing this framework.
    pub framework: Option<FrameworkId>,
}

impl TaskQuery {
    /// Creates a query matching every task.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one owner.
    #[must_use]
    pub const fn owned_by(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Restricts to one visibility.
    #[must_use]
    pub const fn with_visibility(mut self, is_public: bool) -> Self {
        self.is_public = Some(is_public);
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn in_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks referencing a language.
    #[must_use]
    pub const fn using_language(mut self, language: LanguageId) -> Self {
        self.language = Some(language);
        self
    }

    /// Restricts to tasks referencing a framework.
    #[must_use]
    pub const fn using_framework(mut self, framework: FrameworkId) -> Self {
        self.framework = Some(framework);
        self
    }

    /// Returns `true` when `task` passes every set filter.
    #[must_use]
    pub fn matches(&self, task: &LearningTask) -> bool {
        let content = task.content();
        self.owner.is_none_or(|owner| task.owner() == owner)
            && self
                .is_public
                .is_none_or(|is_public| content.is_public() == is_public)
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .language
                .is_none_or(|language| content.languages().contains(&language))
            && self
                .framework
                .is_none_or(|framework| content.frameworks().contains(&framework))
    }
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The stored version differs from the one the writer read.
    #[error("task {task_id} was modified concurrently (expected {expected}, found {actual})")]
    VersionConflict {
        /// Contended task.
        task_id: TaskId,
        /// Version the writer read.
        expected: TaskVersion,
        /// Version currently stored.
        actual: TaskVersion,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
