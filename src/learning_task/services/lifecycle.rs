//! Lifecycle engine: authorization, legality, and Task Store operations.
//!
//! Review, like, and read operations live in sibling modules as further
//! `impl` blocks of [`TaskLifecycleEngine`].

use super::{
    config::LifecycleConfig,
    error::{LifecycleResult, NotFoundError},
    locks::TaskLocks,
    requests::{CreateTaskRequest, EditTaskRequest},
};
use crate::learning_task::{
    domain::{
        Actor, AuthorizationError, IllegalStateError, LearningTask, TaskAccess, TaskContent,
        TaskId, TaskOperation, UserId, ValidationError,
    },
    ports::{
        CatalogLookup, LikeLedger, RemovedReview, ReviewLedger, TaskContentValidator, TaskDraft,
        TaskQuota, TaskRepository,
    },
    validation::DefaultTaskValidator,
};
use mockable::Clock;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Ledger entries taken out while deleting a task.
struct PurgedLedgers {
    reviews: Vec<RemovedReview>,
    likes: Vec<UserId>,
}

/// Orchestrates every mutation of a learning task, its reviews, and likes.
///
/// Each mutating operation resolves the actor once, holds the task's
/// exclusive section for the whole read-modify-write, and either applies
/// every effect or none.
pub struct TaskLifecycleEngine<T, R, L, K, Q, C>
where
    T: TaskRepository,
    R: ReviewLedger,
    L: LikeLedger,
    K: CatalogLookup,
    Q: TaskQuota,
    C: Clock + Send + Sync,
{
    pub(super) tasks: Arc<T>,
    pub(super) reviews: Arc<R>,
    pub(super) likes: Arc<L>,
    catalog: Arc<K>,
    quota: Arc<Q>,
    pub(super) clock: Arc<C>,
    pub(super) validator: DefaultTaskValidator,
    config: LifecycleConfig,
    pub(crate) locks: TaskLocks,
}

impl<T, R, L, K, Q, C> Clone for TaskLifecycleEngine<T, R, L, K, Q, C>
where
    T: TaskRepository,
    R: ReviewLedger,
    L: LikeLedger,
    K: CatalogLookup,
    Q: TaskQuota,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            reviews: Arc::clone(&self.reviews),
            likes: Arc::clone(&self.likes),
            catalog: Arc::clone(&self.catalog),
            quota: Arc::clone(&self.quota),
            clock: Arc::clone(&self.clock),
            validator: self.validator.clone(),
            config: self.config.clone(),
            locks: self.locks.clone(),
        }
    }
}

/// Owner- or admin-triggered status changes.
#[derive(Debug, Clone, Copy)]
enum StatusCommand {
    Submit,
    Resubmit,
    RequestRedo,
}

impl StatusCommand {
    const fn operation(self) -> TaskOperation {
        match self {
            Self::Submit => TaskOperation::Submit,
            Self::Resubmit => TaskOperation::Resubmit,
            Self::RequestRedo => TaskOperation::RequestRedo,
        }
    }

    const fn authorize(self, access: &TaskAccess) -> Result<(), AuthorizationError> {
        match self {
            Self::Submit | Self::Resubmit => access.require_owner(self.operation()),
            Self::RequestRedo => access.require_admin(self.operation()),
        }
    }

    fn apply(self, task: &mut LearningTask, clock: &impl Clock) -> Result<(), IllegalStateError> {
        match self {
            Self::Submit => task.submit(clock),
            Self::Resubmit => task.resubmit(clock),
            Self::RequestRedo => task.request_redo(clock),
        }
    }
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
    /// Creates an engine with default configuration.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        reviews: Arc<R>,
        likes: Arc<L>,
        catalog: Arc<K>,
        quota: Arc<Q>,
        clock: Arc<C>,
    ) -> Self {
        let config = LifecycleConfig::default();
        Self {
            tasks,
            reviews,
            likes,
            catalog,
            quota,
            clock,
            validator: DefaultTaskValidator::with_config(config.validation.clone()),
            config,
            locks: TaskLocks::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.validator = DefaultTaskValidator::with_config(config.validation.clone());
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Creates a draft owned by the calling actor.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] for anonymous callers or an
    /// exhausted quota, and [`super::LifecycleError::Validation`] carrying every
    /// field-level failure of the request.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> LifecycleResult<LearningTask> {
        let owner = actor.authenticated(TaskOperation::Create)?;
        let content = self.validate_draft(&request.into_draft()).await?;
        self.quota.reserve(owner.id()).await?;

        let task = LearningTask::new(owner.id(), content, &*self.clock);
        if let Err(err) = self.tasks.store(&task).await {
            self.release_quota(owner.id()).await;
            return Err(err.into());
        }

        info!(task_id = %task.id(), owner = %owner.id(), "learning task created");
        Ok(task)
    }

    /// Applies a partial content update.
    ///
    /// A task in `redo` stays in `redo`; the owner resubmits explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] unless the actor owns the
    /// task, [`super::LifecycleError::IllegalState`] outside `draft`/`redo`,
    /// [`super::LifecycleError::Validation`] for invalid merged content, and
    /// [`super::LifecycleError::NotFound`] for unknown tasks.
    pub async fn edit_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: &EditTaskRequest,
    ) -> LifecycleResult<LearningTask> {
        self.retrying(TaskOperation::Edit, task_id, move || {
            self.try_edit(actor, task_id, request)
        })
        .await
    }

    async fn try_edit(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: &EditTaskRequest,
    ) -> LifecycleResult<LearningTask> {
        let _guard = self.locks.acquire(task_id).await;
        let (mut task, access) = self.load_visible(actor, task_id, TaskOperation::Edit).await?;
        access.require_owner(TaskOperation::Edit)?;
        task.ensure_editable()?;

        let draft = request.apply_to(TaskDraft::from_content(task.content()));
        let content = self.validate_draft(&draft).await?;
        let expected = task.version();
        task.replace_content(content, &*self.clock)?;
        self.tasks.update(&task, expected).await?;

        debug!(task_id = %task_id, status = %task.status(), "learning task edited");
        Ok(task)
    }

    /// Deletes a task together with its reviews and likes.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] unless the actor is the
    /// owner or an admin, [`super::LifecycleError::IllegalState`] when the owner
    /// (without admin rights) deletes outside `draft`/`redo`, and
    /// [`super::LifecycleError::NotFound`] for unknown tasks.
    pub async fn delete_task(&self, actor: &Actor, task_id: TaskId) -> LifecycleResult<()> {
        self.retrying(TaskOperation::Delete, task_id, move || {
            self.try_delete(actor, task_id)
        })
        .await
    }

    async fn try_delete(&self, actor: &Actor, task_id: TaskId) -> LifecycleResult<()> {
        let _guard = self.locks.acquire(task_id).await;
        let (task, access) = self
            .load_visible(actor, task_id, TaskOperation::Delete)
            .await?;
        if !access.is_admin() {
            access.require_owner(TaskOperation::Delete)?;
            task.ensure_owner_deletable()?;
        }

        let purged = self.purge_ledgers(task_id).await?;
        if let Err(err) = self.tasks.remove(task_id, task.version()).await {
            self.restore_ledgers(task_id, &purged).await;
            return Err(err.into());
        }
        self.release_quota(task.owner()).await;

        info!(
            task_id = %task_id,
            actor = %access.actor(),
            status = %task.status(),
            reviews = purged.reviews.len(),
            likes = purged.likes.len(),
            "learning task deleted"
        );
        Ok(())
    }

    /// Moves the owner's public draft into moderation.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] unless the actor owns the
    /// task and [`super::LifecycleError::IllegalState`] outside `draft` or for a
    /// private task.
    pub async fn submit_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> LifecycleResult<LearningTask> {
        self.change_status(actor, task_id, StatusCommand::Submit)
            .await
    }

    /// Moves the owner's reworked task from `redo` back into moderation.
    ///
    /// No field change is required.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] unless the actor owns the
    /// task and [`super::LifecycleError::IllegalState`] outside `redo` or for a
    /// private task.
    pub async fn resubmit_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> LifecycleResult<LearningTask> {
        self.change_status(actor, task_id, StatusCommand::Resubmit)
            .await
    }

    /// Sends a rated task back to its owner for rework.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] for non-admins and
    /// [`super::LifecycleError::IllegalState`] outside `rated`.
    pub async fn request_redo(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> LifecycleResult<LearningTask> {
        self.change_status(actor, task_id, StatusCommand::RequestRedo)
            .await
    }

    async fn change_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        command: StatusCommand,
    ) -> LifecycleResult<LearningTask> {
        self.retrying(command.operation(), task_id, move || {
            self.try_change_status(actor, task_id, command)
        })
        .await
    }

    async fn try_change_status(
        &self,
        actor: &Actor,
        task_id: TaskId,
        command: StatusCommand,
    ) -> LifecycleResult<LearningTask> {
        let _guard = self.locks.acquire(task_id).await;
        let (mut task, access) = self
            .load_visible(actor, task_id, command.operation())
            .await?;
        command.authorize(&access)?;

        let previous = task.status();
        let expected = task.version();
        command.apply(&mut task, &*self.clock)?;
        self.tasks.update(&task, expected).await?;

        info!(
            task_id = %task_id,
            actor = %access.actor(),
            from = %previous,
            to = %task.status(),
            "learning task status changed"
        );
        Ok(task)
    }

    /// Loads a task or reports it missing.
    pub(super) async fn load_task(&self, task_id: TaskId) -> LifecycleResult<LearningTask> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| NotFoundError::Task(task_id).into())
    }

    /// Loads a task and resolves the actor's access to it.
    ///
    /// Tasks the actor may not view are reported missing.
    pub(super) async fn load_visible(
        &self,
        actor: &Actor,
        task_id: TaskId,
        operation: TaskOperation,
    ) -> LifecycleResult<(LearningTask, TaskAccess)> {
        let authenticated = actor.authenticated(operation)?;
        let task = self.load_task(task_id).await?;
        let access = TaskAccess::resolve(authenticated, &task);
        if !access.can_view() {
            return Err(NotFoundError::Task(task_id).into());
        }
        Ok((task, access))
    }

    /// Runs `attempt`, re-running it after conflicting writes.
    pub(super) async fn retrying<V, F, Fut>(
        &self,
        operation: TaskOperation,
        task_id: TaskId,
        mut attempt: F,
    ) -> LifecycleResult<V>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = LifecycleResult<V>>,
    {
        let mut retries = 0_u32;
        loop {
            match attempt().await {
                Err(err) if err.is_conflict() && retries < self.config.max_conflict_retries => {
                    retries = retries.saturating_add(1);
                    warn!(
                        task_id = %task_id,
                        operation = %operation,
                        retry = retries,
                        error = %err,
                        "retrying after conflicting write"
                    );
                }
                result => return result,
            }
        }
    }

    /// Validates a draft and resolves its catalog references, collecting
    /// every failure.
    async fn validate_draft(&self, draft: &TaskDraft) -> LifecycleResult<TaskContent> {
        let languages = draft.languages.iter().copied().collect();
        let frameworks = draft.frameworks.iter().copied().collect();
        let mut unresolved: Vec<ValidationError> = self
            .catalog
            .unresolved_languages(&languages)
            .await?
            .into_iter()
            .map(ValidationError::UnknownLanguage)
            .collect();
        unresolved.extend(
            self.catalog
                .unresolved_frameworks(&frameworks)
                .await?
                .into_iter()
                .map(ValidationError::UnknownFramework),
        );

        match self.validator.validate_content(draft) {
            Ok(content) => match ValidationError::multiple(unresolved) {
                Some(err) => Err(err.into()),
                None => Ok(content),
            },
            Err(err) if unresolved.is_empty() => Err(err.into()),
            Err(err) => {
                let mut errors = err.into_errors();
                errors.extend(unresolved);
                Err(ValidationError::Multiple(errors).into())
            }
        }
    }

    /// Empties both ledgers of a task ahead of its removal.
    ///
    /// A failed like purge puts the already purged reviews back.
    async fn purge_ledgers(&self, task_id: TaskId) -> LifecycleResult<PurgedLedgers> {
        let reviews = self.reviews.remove_all_for_task(task_id).await?;
        match self.likes.remove_all_for_task(task_id).await {
            Ok(likes) => Ok(PurgedLedgers { reviews, likes }),
            Err(err) => {
                let partial = PurgedLedgers {
                    reviews,
                    likes: Vec::new(),
                };
                self.restore_ledgers(task_id, &partial).await;
                Err(err.into())
            }
        }
    }

    /// Puts purged ledger entries back when the task itself survived.
    async fn restore_ledgers(&self, task_id: TaskId, purged: &PurgedLedgers) {
        for removed in &purged.reviews {
            if let Err(err) = self.reviews.restore(removed).await {
                error!(
                    task_id = %task_id,
                    reviewer = %removed.review.reviewer(),
                    error = %err,
                    "failed to restore review of retained task"
                );
            }
        }
        if let Err(err) = self.likes.restore_all(task_id, &purged.likes).await {
            error!(task_id = %task_id, error = %err, "failed to restore likes of retained task");
        }
        warn!(
            task_id = %task_id,
            reviews = purged.reviews.len(),
            likes = purged.likes.len(),
            "ledger purge reverted after failed task removal"
        );
    }

    async fn release_quota(&self, owner: UserId) {
        if let Err(err) = self.quota.release(owner).await {
            warn!(owner = %owner, error = %err, "failed to return task creation unit");
        }
    }
}
