//! Read-side projections for presentation layers.

use super::{error::LifecycleResult, lifecycle::TaskLifecycleEngine};
use crate::learning_task::{
    domain::{
        Actor, AverageRating, LearningTask, Review, TaskAccess, TaskId, TaskOperation, TaskStatus,
    },
    ports::{CatalogLookup, LikeLedger, ReviewLedger, TaskQuery, TaskQuota, TaskRepository},
};
use mockable::Clock;
use serde::Serialize;

/// Caller-specific snapshot of a task with its derived figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    /// The task record.
    pub task: LearningTask,
    /// Number of users liking the task.
    pub like_count: u64,
    /// Whether the caller likes the task.
    pub liked_by_caller: bool,
    /// The caller's own review, if any.
    pub own_review: Option<Review>,
    /// Every review, newest first.
    pub reviews: Vec<Review>,
    /// Mean rating over every review.
    pub average_rating: AverageRating,
}

impl TaskView {
    /// Returns the task's moderation status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.task.status()
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
    /// Builds the caller's view of one task.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] for anonymous
    /// callers and [`super::LifecycleError::NotFound`] for unknown or
    /// invisible tasks.
    pub async fn get_task_view(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> LifecycleResult<TaskView> {
        let (task, access) = self.load_visible(actor, task_id, TaskOperation::View).await?;
        let caller = access.actor().id();

        let reviews = self.reviews.list_for_task(task_id).await?;
        let like_count = self.likes.count(task_id).await?;
        let liked_by_caller = self.likes.contains(task_id, caller).await?;
        let own_review = reviews
            .iter()
            .find(|review| review.reviewer() == caller)
            .cloned();
        let average_rating = AverageRating::from_reviews(&reviews);

        Ok(TaskView {
            task,
            like_count,
            liked_by_caller,
            own_review,
            reviews,
            average_rating,
        })
    }

    /// Lists the tasks matching `query` that the caller may view, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`super::LifecycleError::Authorization`] for anonymous
    /// callers.
    pub async fn list_tasks(
        &self,
        actor: &Actor,
        query: &TaskQuery,
    ) -> LifecycleResult<Vec<LearningTask>> {
        let caller = actor.authenticated(TaskOperation::View)?;
        let tasks = self.tasks.list(query).await?;
        Ok(tasks
            .into_iter()
            .filter(|task| TaskAccess::resolve(caller, task).can_view())
            .collect())
    }
}
