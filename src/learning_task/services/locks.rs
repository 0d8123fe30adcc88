//! Per-task exclusive sections.

use crate::learning_task::domain::TaskId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Registry = Arc<Mutex<HashMap<TaskId, Arc<AsyncMutex<()>>>>>;

/// Registry of one async mutex per task.
///
/// Every mutating operation on a task holds its guard for the whole
/// read-modify-write, so operations on one task are linearized while
/// different tasks proceed independently. An entry lives only while some
/// operation holds or waits for it.
#[derive(Debug, Clone, Default)]
pub(crate) struct TaskLocks {
    inner: Registry,
}

/// Exclusive access to one task; releasing it prunes the idle entry.
#[derive(Debug)]
pub(crate) struct TaskGuard {
    guard: Option<OwnedMutexGuard<()>>,
    task_id: TaskId,
    registry: Registry,
}

impl TaskLocks {
    /// Waits for exclusive access to `task_id`.
    pub(crate) async fn acquire(&self, task_id: TaskId) -> TaskGuard {
        let lock = {
            let mut locks = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(task_id).or_default())
        };
        TaskGuard {
            guard: Some(lock.lock_owned().await),
            task_id,
            registry: Arc::clone(&self.inner),
        }
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        // Waiters hold a clone, so a count of one means nobody else needs it.
        if locks
            .get(&self.task_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.task_id);
        }
    }
}
