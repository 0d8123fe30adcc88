//! Likes, rating figures, and serialized views.

use super::helpers::{Cast, TestEngine, cast, engine, id_of, todo_request};
use assay::learning_task::{
    domain::{Actor, AverageRating, LikeAction, UserId},
    services::{LifecycleConfig, ReviewRequest},
};
use eyre::ensure;
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owners_may_like_their_own_tasks(engine: TestEngine, cast: Cast) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;

    let liked = engine.toggle_like(&cast.owner, task.id()).await?;
    ensure!(liked.action == LikeAction::Liked);
    ensure!(liked.count == 1);

    let other = engine.toggle_like(&cast.member, task.id()).await?;
    ensure!(other.count == 2);

    let unliked = engine.toggle_like(&cast.owner, task.id()).await?;
    ensure!(unliked.action == LikeAction::Unliked);
    ensure!(engine.like_count(task.id()).await? == 1);

    let stored = engine.get_task_view(&cast.owner, task.id()).await?;
    ensure!(stored.task.version() == task.version());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn average_counts_every_review(engine: TestEngine, cast: Cast) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;
    engine.submit_task(&cast.owner, task.id()).await?;
    for rating in [5, 4, 4] {
        let reviewer = Actor::member(UserId::new());
        engine
            .upsert_review(&reviewer, task.id(), &ReviewRequest::new(rating, "Reviewed"))
            .await?;
    }
    engine
        .upsert_review(&cast.admin, task.id(), &ReviewRequest::new(1, "Needs work"))
        .await?;

    let average = engine.average_rating(task.id()).await?;
    ensure!(average == AverageRating::from_parts(14, 4));
    ensure!(average.review_count() == 4);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn view_lists_latest_review_first(engine: TestEngine, cast: Cast) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;
    engine
        .upsert_review(&cast.member, task.id(), &ReviewRequest::new(3, "First"))
        .await?;
    engine
        .upsert_review(&cast.admin, task.id(), &ReviewRequest::new(4, "Second"))
        .await?;

    let view = engine.get_task_view(&cast.member, task.id()).await?;
    let reviewers: Vec<UserId> = view.reviews.iter().map(|review| review.reviewer()).collect();
    ensure!(reviewers == vec![id_of(&cast.admin)?, id_of(&cast.member)?]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_view_serializes_for_presentation(
    engine: TestEngine,
    cast: Cast,
) -> eyre::Result<()> {
    let task = engine.create_task(&cast.owner, todo_request()).await?;
    engine
        .upsert_review(&cast.member, task.id(), &ReviewRequest::new(4, "Nice"))
        .await?;
    let view = engine.get_task_view(&cast.member, task.id()).await?;

    let json = serde_json::to_value(&view)?;
    ensure!(json.pointer("/task/status") == Some(&Value::from("draft")));
    ensure!(json.pointer("/average_rating") == Some(&Value::from(4.0)));
    ensure!(json.pointer("/own_review/rating") == Some(&Value::from(4)));
    ensure!(json.pointer("/liked_by_caller") == Some(&Value::Bool(false)));
    Ok(())
}

#[rstest]
fn lifecycle_config_deserializes_partial_documents() -> eyre::Result<()> {
    let config: LifecycleConfig = serde_json::from_str(
        r#"{"max_conflict_retries": 1, "validation": {"repository_link_prefix": "https://"}}"#,
    )?;
    ensure!(config.max_conflict_retries == 1);
    ensure!(config.validation.repository_link_prefix == "https://");
    ensure!(config.validation.max_title_length == 100);
    Ok(())
}
