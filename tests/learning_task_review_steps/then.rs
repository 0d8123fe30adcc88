//! Then steps for learning task moderation scenarios.

use super::world::{ModerationWorld, run_async};
use assay::learning_task::{
    domain::{AuthorizationError, TaskStatus},
    services::LifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &ModerationWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let task_id = world.task_id()?;
    let view = run_async(world.engine.get_task_view(&world.owner, task_id))
        .map_err(|err| eyre::eyre!("view failed: {err}"))?;
    if view.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            view.status()
        ));
    }
    Ok(())
}

#[then("the review count is {count:usize}")]
fn review_count_is(world: &ModerationWorld, count: usize) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let view = run_async(world.engine.get_task_view(&world.owner, task_id))
        .map_err(|err| eyre::eyre!("view failed: {err}"))?;
    if view.reviews.len() != count {
        return Err(eyre::eyre!(
            "expected {count} reviews, found {}",
            view.reviews.len()
        ));
    }
    Ok(())
}

#[then("the review is rejected as a self review")]
fn review_rejected_as_self_review(world: &ModerationWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_review_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing review result in scenario world"))?;
    if !matches!(
        result,
        Err(LifecycleError::Authorization(AuthorizationError::SelfReview(_)))
    ) {
        return Err(eyre::eyre!("expected self review rejection, got {result:?}"));
    }
    Ok(())
}
