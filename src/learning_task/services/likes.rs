//! Like membership operations.

use super::{error::LifecycleResult, lifecycle::TaskLifecycleEngine};
use crate::learning_task::{
    domain::{Actor, LikeToggle, TaskId, TaskOperation},
    ports::{CatalogLookup, LikeLedger, ReviewLedger, TaskQuota, TaskRepository},
};
use mockable::Clock;
use tracing::debug;

impl<T, R, L, K, Q, C> TaskLifecycleEngine<T, R, L, K, Q, C>
where
    T: TaskRepository,
    R: ReviewLedger,
    L: LikeLedger,
    K: CatalogLookup,
    Q: TaskQuota,
    C: Clock + Send + Sync,
{
    /// Flips the actor's like of a task and returns the new count.
    ///
    /// Owners may like their own tasks. Likes never touch the task record.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] for anonymous
    /// callers and [`super::LifecycleError::NotFound`] for unknown or
    /// invisible tasks.
    pub async fn toggle_like(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> LifecycleResult<LikeToggle> {
        let _guard = self.locks.acquire(task_id).await;
        let (_, access) = self
            .load_visible(actor, task_id, TaskOperation::ToggleLike)
            .await?;
        let user = access.actor().id();
        let toggle = self.likes.toggle(task_id, user).await?;

        debug!(
            task_id = %task_id,
            user = %user,
            action = %toggle.action,
            count = toggle.count,
            "like toggled"
        );
        Ok(toggle)
    }

    /// Returns the number of users liking a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::NotFound`] for unknown tasks.
    pub async fn like_count(&self, task_id: TaskId) -> LifecycleResult<u64> {
        self.load_task(task_id).await?;
        Ok(self.likes.count(task_id).await?)
    }
}
