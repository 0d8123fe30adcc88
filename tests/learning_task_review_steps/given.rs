//! Given steps for learning task moderation scenarios.

use super::world::{ModerationWorld, RUST, run_async};
use assay::learning_task::services::{CreateTaskRequest, ReviewRequest};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a submitted learning task")]
fn submitted_learning_task(world: &mut ModerationWorld) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new("Todo API", "Expose CRUD endpoints", [RUST])
        .with_repository_link("https://github.com/alice/todo-api");
    let task = run_async(world.engine.create_task(&world.owner, request))
        .wrap_err("create task for scenario")?;
    run_async(world.engine.submit_task(&world.owner, task.id()))
        .wrap_err("submit task for scenario")?;
    world.task_id = Some(task.id());
    Ok(())
}

#[given("an admin has reviewed the task with rating {rating:u8}")]
fn admin_has_reviewed(world: &mut ModerationWorld, rating: u8) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let request = ReviewRequest::new(rating, "Moderation feedback");
    run_async(world.engine.upsert_review(&world.admin, task_id, &request))
        .wrap_err("record admin review for scenario")?;
    Ok(())
}
