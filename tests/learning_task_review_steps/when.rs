//! When steps for learning task moderation scenarios.

use super::world::{ModerationWorld, run_async};
use assay::learning_task::{domain::Actor, services::ReviewRequest};
use eyre::WrapErr;
use rstest_bdd_macros::when;

fn review_as(
    world: &mut ModerationWorld,
    reviewer: Actor,
    rating: u8,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let request = ReviewRequest::new(rating, "Scenario feedback");
    world.last_review_result = Some(run_async(
        world.engine.upsert_review(&reviewer, task_id, &request),
    ));
    Ok(())
}

#[when("an admin reviews the task with rating {rating:u8}")]
fn admin_reviews(world: &mut ModerationWorld, rating: u8) -> Result<(), eyre::Report> {
    let admin = world.admin;
    review_as(world, admin, rating)
}

#[when("a member reviews the task with rating {rating:u8}")]
fn member_reviews(world: &mut ModerationWorld, rating: u8) -> Result<(), eyre::Report> {
    let member = world.member;
    review_as(world, member, rating)
}

#[when("the owner reviews the task with rating {rating:u8}")]
fn owner_reviews(world: &mut ModerationWorld, rating: u8) -> Result<(), eyre::Report> {
    let owner = world.owner;
    review_as(world, owner, rating)
}

#[when("the admin removes their review")]
fn admin_removes_review(world: &mut ModerationWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let Actor::Authenticated(admin) = world.admin else {
        return Err(eyre::eyre!("scenario admin must be authenticated"));
    };
    run_async(world.engine.delete_review(&world.admin, task_id, admin.id()))
        .wrap_err("remove admin review")?;
    Ok(())
}

#[when("the admin requests a redo")]
fn admin_requests_redo(world: &mut ModerationWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.engine.request_redo(&world.admin, task_id)).wrap_err("request redo")?;
    Ok(())
}

#[when("the owner resubmits the task")]
fn owner_resubmits(world: &mut ModerationWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    run_async(world.engine.resubmit_task(&world.owner, task_id)).wrap_err("resubmit task")?;
    Ok(())
}
