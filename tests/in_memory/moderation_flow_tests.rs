//! End-to-end moderation flows through the lifecycle engine.

use super::helpers::{Cast, GO, RUST, TestEngine, cast, engine, id_of, todo_request};
use assay::learning_task::{
    domain::{Actor, AverageRating, TaskStatus, UserId},
    ports::TaskQuery,
    services::{EditTaskRequest, LifecycleErrorKind, ReviewRequest},
};
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_travels_from_draft_to_rated_and_back(
    engine: TestEngine,
    cast: Cast,
) -> eyre::Result<()> {
    let Cast {
        owner,
        member,
        admin,
    } = cast;
    let task = engine.create_task(&owner, todo_request()).await?;
    ensure!(task.status() == TaskStatus::Draft);

    let submitted = engine.submit_task(&owner, task.id()).await?;
    ensure!(submitted.status() == TaskStatus::UnderReview);

    let peer = engine
        .upsert_review(&member, task.id(), &ReviewRequest::new(4, "Clean handlers"))
        .await?;
    ensure!(peer.status == TaskStatus::UnderReview);

    let moderation = engine
        .upsert_review(&admin, task.id(), &ReviewRequest::new(3, "Add pagination"))
        .await?;
    ensure!(moderation.status == TaskStatus::Rated);

    let redo = engine.request_redo(&admin, task.id()).await?;
    ensure!(redo.status() == TaskStatus::Redo);

    let edit = EditTaskRequest::new()
        .with_description("Expose CRUD endpoints with pagination")
        .with_languages([RUST, GO]);
    let edited = engine.edit_task(&owner, task.id(), &edit).await?;
    ensure!(edited.status() == TaskStatus::Redo);

    let resubmitted = engine.resubmit_task(&owner, task.id()).await?;
    ensure!(resubmitted.status() == TaskStatus::UnderReview);

    let rerated = engine
        .upsert_review(&admin, task.id(), &ReviewRequest::new(5, "Pagination looks right"))
        .await?;
    ensure!(!rerated.created);
    ensure!(rerated.status == TaskStatus::Rated);

    let view = engine.get_task_view(&owner, task.id()).await?;
    ensure!(view.reviews.len() == 2);
    ensure!(view.average_rating.to_string() == "4.50");
    ensure!(view.task.content().languages().len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn withdrawn_admin_review_reopens_moderation(
    engine: TestEngine,
    cast: Cast,
) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;
    engine.submit_task(&cast.owner, task.id()).await?;
    engine
        .upsert_review(&cast.admin, task.id(), &ReviewRequest::new(2, "Incomplete"))
        .await?;

    let removal = engine
        .delete_review(&cast.admin, task.id(), id_of(&cast.admin)?)
        .await?;
    ensure!(removal.status == TaskStatus::UnderReview);

    let redo = engine.request_redo(&cast.admin, task.id()).await;
    ensure!(redo.map_err(|err| err.kind()).err() == Some(LifecycleErrorKind::IllegalState));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_admin_review_keeps_rating_and_moves_average(
    engine: TestEngine,
    cast: Cast,
) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;
    engine.submit_task(&cast.owner, task.id()).await?;

    let first = engine
        .upsert_review(&cast.admin, task.id(), &ReviewRequest::new(4, "Solid"))
        .await?;
    ensure!(first.status == TaskStatus::Rated);
    ensure!(engine.average_rating(task.id()).await? == AverageRating::whole(4));

    let second_admin = Actor::admin(UserId::new());
    let second = engine
        .upsert_review(&second_admin, task.id(), &ReviewRequest::new(2, "Missing tests"))
        .await?;
    ensure!(second.status == TaskStatus::Rated);
    ensure!(engine.average_rating(task.id()).await? == AverageRating::whole(3));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_sole_admin_review_leaves_member_average(
    engine: TestEngine,
    cast: Cast,
) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;
    engine.submit_task(&cast.owner, task.id()).await?;
    engine
        .upsert_review(&cast.admin, task.id(), &ReviewRequest::new(4, "Solid"))
        .await?;
    engine
        .upsert_review(&cast.member, task.id(), &ReviewRequest::new(2, "Hard to follow"))
        .await?;
    ensure!(engine.average_rating(task.id()).await? == AverageRating::whole(3));

    let removal = engine
        .delete_review(&cast.admin, task.id(), id_of(&cast.admin)?)
        .await?;
    ensure!(removal.status == TaskStatus::UnderReview);
    ensure!(engine.average_rating(task.id()).await? == AverageRating::whole(2));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_operations_leave_state_untouched(
    engine: TestEngine,
    cast: Cast,
) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;
    engine.submit_task(&cast.owner, task.id()).await?;
    let before = engine.get_task_view(&cast.owner, task.id()).await?;

    let attempts = [
        engine
            .edit_task(&cast.owner, task.id(), &EditTaskRequest::new().with_title("New"))
            .await
            .map(|_| ()),
        engine.request_redo(&cast.member, task.id()).await.map(|_| ()),
        engine.delete_task(&cast.owner, task.id()).await,
        engine
            .upsert_review(&cast.owner, task.id(), &ReviewRequest::new(5, "Self praise"))
            .await
            .map(|_| ()),
        engine
            .upsert_review(&Actor::Anonymous, task.id(), &ReviewRequest::new(5, "Drive-by"))
            .await
            .map(|_| ()),
    ];
    for attempt in attempts {
        ensure!(attempt.is_err(), "operation unexpectedly succeeded");
    }

    let after = engine.get_task_view(&cast.owner, task.id()).await?;
    ensure!(after == before);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_combines_filters_with_visibility(
    engine: TestEngine,
    cast: Cast,
) -> eyre::Result<()> {
    let public = engine.create_task(&cast.owner, todo_request()).await?;
    engine.submit_task(&cast.owner, public.id()).await?;
    let hidden = engine
        .create_task(&cast.owner, todo_request().with_visibility(false))
        .await?;

    let moderation_queue = engine
        .list_tasks(&cast.admin, &TaskQuery::all().in_status(TaskStatus::UnderReview))
        .await?;
    ensure!(moderation_queue.len() == 1);
    ensure!(moderation_queue.first().map(|task| task.id()) == Some(public.id()));

    let drafts_seen_by_member = engine
        .list_tasks(&cast.member, &TaskQuery::all().in_status(TaskStatus::Draft))
        .await?;
    ensure!(drafts_seen_by_member.is_empty());

    let own_drafts = engine
        .list_tasks(
            &cast.owner,
            &TaskQuery::all()
                .owned_by(id_of(&cast.owner)?)
                .in_status(TaskStatus::Draft),
        )
        .await?;
    ensure!(own_drafts.first().map(|task| task.id()) == Some(hidden.id()));
    Ok(())
}
