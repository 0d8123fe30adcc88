//! Shared fixtures for engine-level unit tests.

use std::sync::Arc;

use crate::learning_task::{
    adapters::memory::{
        InMemoryCatalog, InMemoryLikeLedger, InMemoryReviewLedger, InMemoryTaskQuota,
        InMemoryTaskRepository,
    },
    domain::{
        Actor, FrameworkId, LanguageId, LearningTask, TaskContent, TaskDescription, TaskTitle,
        UserId,
    },
    services::{CreateTaskRequest, LifecycleResult, TaskLifecycleEngine},
};
use mockable::DefaultClock;
use rstest::fixture;

pub(super) const RUST: LanguageId = LanguageId::new(1);
pub(super) const PYTHON: LanguageId = LanguageId::new(2);
pub(super) const AXUM: FrameworkId = FrameworkId::new(10);

pub(super) type TestEngine = TaskLifecycleEngine<
    InMemoryTaskRepository,
    InMemoryReviewLedger,
    InMemoryLikeLedger,
    InMemoryCatalog,
    InMemoryTaskQuota,
    DefaultClock,
>;

/// Engine with its adapters kept reachable for direct inspection.
pub(super) struct Harness {
    pub engine: TestEngine,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub reviews: Arc<InMemoryReviewLedger>,
    pub likes: Arc<InMemoryLikeLedger>,
    pub quota: Arc<InMemoryTaskQuota>,
}

impl Harness {
    pub fn with_quota(quota: InMemoryTaskQuota) -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let reviews = Arc::new(InMemoryReviewLedger::new());
        let likes = Arc::new(InMemoryLikeLedger::new());
        let quota_port = Arc::new(quota);
        let engine = TaskLifecycleEngine::new(
            Arc::clone(&tasks),
            Arc::clone(&reviews),
            Arc::clone(&likes),
            Arc::new(InMemoryCatalog::with_entries([RUST, PYTHON], [AXUM])),
            Arc::clone(&quota_port),
            Arc::new(DefaultClock),
        );
        Self {
            engine,
            tasks,
            reviews,
            likes,
            quota: quota_port,
        }
    }
}

#[fixture]
pub(super) fn harness() -> Harness {
    Harness::with_quota(InMemoryTaskQuota::unlimited())
}

#[fixture]
pub(super) fn owner() -> Actor {
    Actor::member(UserId::new())
}

#[fixture]
pub(super) fn member() -> Actor {
    Actor::member(UserId::new())
}

#[fixture]
pub(super) fn admin() -> Actor {
    Actor::admin(UserId::new())
}

pub(super) fn user_id(actor: &Actor) -> UserId {
    match actor {
        Actor::Authenticated(authenticated) => authenticated.id(),
        Actor::Anonymous => UserId::default(),
    }
}

pub(super) fn valid_request(title: &str) -> CreateTaskRequest {
    CreateTaskRequest::new(title, "Build a todo API", [RUST])
        .with_repository_link("https://github.com/alice/todo")
        .with_frameworks([AXUM])
}

pub(super) fn sample_content() -> TaskContent {
    TaskContent::new(
        TaskTitle::new("Todo API").expect("valid title"),
        TaskDescription::new("Build a todo API").expect("valid description"),
        [RUST],
    )
    .expect("valid content")
}

/// Creates and submits a public task owned by `owner`.
pub(super) async fn submitted_task(
    engine: &TestEngine,
    owner: &Actor,
) -> LifecycleResult<LearningTask> {
    let task = engine.create_task(owner, valid_request("Todo API")).await?;
    engine.submit_task(owner, task.id()).await
}
