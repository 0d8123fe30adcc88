//! In-memory Task Store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::learning_task::{
    domain::{LearningTask, TaskId, TaskVersion},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, LearningTask>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Checks that `id` is stored at version `expected`.
fn check_version(
    tasks: &HashMap<TaskId, LearningTask>,
    id: TaskId,
    expected: TaskVersion,
) -> TaskRepositoryResult<()> {
    let stored = tasks.get(&id).ok_or(TaskRepositoryError::NotFound(id))?;
    if stored.version() != expected {
        return Err(TaskRepositoryError::VersionConflict {
            task_id: id,
            expected,
            actual: stored.version(),
        });
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &LearningTask) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(
        &self,
        task: &LearningTask,
        expected: TaskVersion,
    ) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        check_version(&tasks, task.id(), expected)?;
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn remove(&self, id: TaskId, expected: TaskVersion) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        check_version(&tasks, id, expected)?;
        tasks.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<LearningTask>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<LearningTask>> {
        let tasks = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<LearningTask> = tasks
            .values()
            .filter(|task| query.matches(task))
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(matching)
    }
}
