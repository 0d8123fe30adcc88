//! Shared world state for learning task moderation BDD scenarios.

use std::sync::Arc;

use assay::learning_task::{
    adapters::memory::{
        InMemoryCatalog, InMemoryLikeLedger, InMemoryReviewLedger, InMemoryTaskQuota,
        InMemoryTaskRepository,
    },
    domain::{Actor, FrameworkId, LanguageId, TaskId, UserId},
    services::{LifecycleError, ReviewOutcome, TaskLifecycleEngine},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Language registered in the scenario catalog.
pub const RUST: LanguageId = LanguageId::new(1);

/// Engine type used by the BDD world.
pub type TestEngine = TaskLifecycleEngine<
    InMemoryTaskRepository,
    InMemoryReviewLedger,
    InMemoryLikeLedger,
    InMemoryCatalog,
    InMemoryTaskQuota,
    DefaultClock,
>;

/// Scenario world for moderation behaviour tests.
pub struct ModerationWorld {
    pub engine: TestEngine,
    pub owner: Actor,
    pub member: Actor,
    pub admin: Actor,
    pub task_id: Option<TaskId>,
    pub last_review_result: Option<Result<ReviewOutcome, LifecycleError>>,
}

impl ModerationWorld {
    /// Creates a world with fresh adapters and actors.
    #[must_use]
    pub fn new() -> Self {
        let engine = TaskLifecycleEngine::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryReviewLedger::new()),
            Arc::new(InMemoryLikeLedger::new()),
            Arc::new(InMemoryCatalog::with_entries([RUST], Vec::<FrameworkId>::new())),
            Arc::new(InMemoryTaskQuota::unlimited()),
            Arc::new(DefaultClock),
        );
        Self {
            engine,
            owner: Actor::member(UserId::new()),
            member: Actor::member(UserId::new()),
            admin: Actor::admin(UserId::new()),
            task_id: None,
            last_review_result: None,
        }
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created yet.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        self.task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for ModerationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ModerationWorld {
    ModerationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
