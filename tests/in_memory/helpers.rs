//! Shared helpers for in-memory moderation integration tests.

use std::sync::Arc;

use assay::learning_task::{
    adapters::memory::{
        InMemoryCatalog, InMemoryLikeLedger, InMemoryReviewLedger, InMemoryTaskQuota,
        InMemoryTaskRepository,
    },
    domain::{Actor, FrameworkId, LanguageId, UserId},
    services::{CreateTaskRequest, TaskLifecycleEngine},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Language present in the test catalog.
pub const RUST: LanguageId = LanguageId::new(1);
/// Second language present in the test catalog.
pub const GO: LanguageId = LanguageId::new(2);
/// Framework present in the test catalog.
pub const AXUM: FrameworkId = FrameworkId::new(7);

/// Engine wired to in-memory adapters.
pub type TestEngine = TaskLifecycleEngine<
    InMemoryTaskRepository,
    InMemoryReviewLedger,
    InMemoryLikeLedger,
    InMemoryCatalog,
    InMemoryTaskQuota,
    DefaultClock,
>;

/// Provides a fresh engine for each test.
#[fixture]
pub fn engine() -> TestEngine {
    TaskLifecycleEngine::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(InMemoryReviewLedger::new()),
        Arc::new(InMemoryLikeLedger::new()),
        Arc::new(InMemoryCatalog::with_entries([RUST, GO], [AXUM])),
        Arc::new(InMemoryTaskQuota::unlimited()),
        Arc::new(DefaultClock),
    )
}

/// Cast of actors shared by most scenarios.
pub struct Cast {
    /// Task author.
    pub owner: Actor,
    /// Regular reviewer.
    pub member: Actor,
    /// Moderator.
    pub admin: Actor,
}

/// Provides distinct owner, member, and admin actors.
#[fixture]
pub fn cast() -> Cast {
    Cast {
        owner: Actor::member(UserId::new()),
        member: Actor::member(UserId::new()),
        admin: Actor::admin(UserId::new()),
    }
}

/// Returns the identifier of an authenticated actor.
///
/// # Errors
///
/// Returns an error for anonymous actors.
pub fn id_of(actor: &Actor) -> eyre::Result<UserId> {
    match actor {
        Actor::Authenticated(authenticated) => Ok(authenticated.id()),
        Actor::Anonymous => Err(eyre::eyre!("anonymous actor has no identifier")),
    }
}

/// Builds a valid public task request.
#[must_use]
pub fn todo_request() -> CreateTaskRequest {
    CreateTaskRequest::new("Todo API", "Expose CRUD endpoints for todos", [RUST])
        .with_repository_link("https://github.com/alice/todo-api")
        .with_frameworks([AXUM])
}
