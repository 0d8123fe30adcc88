//! Unit tests for the task status state machine.

use super::support::sample_content;
use crate::learning_task::domain::{
    IllegalStateError, LearningTask, TaskEvent, TaskOperation, TaskStatus, TaskVersion, UserId,
};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn draft() -> LearningTask {
    LearningTask::new(UserId::new(), sample_content(), &DefaultClock)
}

#[rstest]
#[case(TaskStatus::Draft, TaskEvent::Submit, Some(TaskStatus::UnderReview))]
#[case(TaskStatus::Draft, TaskEvent::Resubmit, None)]
#[case(TaskStatus::Draft, TaskEvent::AdminReviewRecorded, None)]
#[case(TaskStatus::Draft, TaskEvent::RequestRedo, None)]
#[case(TaskStatus::UnderReview, TaskEvent::Submit, None)]
#[case(TaskStatus::UnderReview, TaskEvent::AdminReviewRecorded, Some(TaskStatus::Rated))]
#[case(TaskStatus::UnderReview, TaskEvent::AdminReviewsWithdrawn, None)]
#[case(TaskStatus::UnderReview, TaskEvent::RequestRedo, None)]
#[case(TaskStatus::Rated, TaskEvent::AdminReviewRecorded, None)]
#[case(TaskStatus::Rated, TaskEvent::AdminReviewsWithdrawn, Some(TaskStatus::UnderReview))]
#[case(TaskStatus::Rated, TaskEvent::RequestRedo, Some(TaskStatus::Redo))]
#[case(TaskStatus::Rated, TaskEvent::Submit, None)]
#[case(TaskStatus::Redo, TaskEvent::Resubmit, Some(TaskStatus::UnderReview))]
#[case(TaskStatus::Redo, TaskEvent::Submit, None)]
#[case(TaskStatus::Redo, TaskEvent::AdminReviewRecorded, None)]
#[case(TaskStatus::Redo, TaskEvent::RequestRedo, None)]
fn next_follows_transition_table(
    #[case] from: TaskStatus,
    #[case] event: TaskEvent,
    #[case] expected: Option<TaskStatus>,
) {
    assert_eq!(from.next(event), expected);
}

#[rstest]
#[case(TaskStatus::Draft, true)]
#[case(TaskStatus::UnderReview, false)]
#[case(TaskStatus::Rated, false)]
#[case(TaskStatus::Redo, true)]
fn is_editable_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_editable(), expected);
}

#[rstest]
fn status_names_round_trip_through_try_from() -> eyre::Result<()> {
    for status in TaskStatus::ALL {
        let parsed = TaskStatus::try_from(status.as_str())?;
        ensure!(parsed == status, "{status} parsed as {parsed}");
    }
    ensure!(TaskStatus::UnderReview.to_string() == "under_review");
    ensure!(TaskStatus::try_from("archived").is_err());
    Ok(())
}

#[rstest]
fn new_task_starts_as_draft_at_initial_version(draft: LearningTask) {
    assert_eq!(draft.status(), TaskStatus::Draft);
    assert_eq!(draft.version(), TaskVersion::INITIAL);
    assert_eq!(draft.created_at(), draft.updated_at());
}

#[rstest]
fn full_moderation_cycle_bumps_version_each_step(
    clock: DefaultClock,
    mut draft: LearningTask,
) -> eyre::Result<()> {
    draft.submit(&clock)?;
    ensure!(draft.status() == TaskStatus::UnderReview);
    ensure!(draft.record_admin_review(&clock));
    ensure!(draft.status() == TaskStatus::Rated);
    draft.request_redo(&clock)?;
    ensure!(draft.status() == TaskStatus::Redo);
    draft.resubmit(&clock)?;
    ensure!(draft.status() == TaskStatus::UnderReview);
    ensure!(draft.version() == TaskVersion::new(5));
    Ok(())
}

#[rstest]
fn submit_rejects_private_draft(clock: DefaultClock) -> eyre::Result<()> {
    let mut task = LearningTask::new(
        UserId::new(),
        sample_content().with_visibility(false),
        &clock,
    );
    let result = task.submit(&clock);
    let expected = Err(IllegalStateError::NotPublic {
        task_id: task.id(),
        operation: TaskOperation::Submit,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    ensure!(task.status() == TaskStatus::Draft);
    ensure!(task.version() == TaskVersion::INITIAL);
    Ok(())
}

#[rstest]
fn request_redo_outside_rated_is_rejected(
    clock: DefaultClock,
    mut draft: LearningTask,
) -> eyre::Result<()> {
    draft.submit(&clock)?;
    let result = draft.request_redo(&clock);
    let expected = Err(IllegalStateError::Transition {
        task_id: draft.id(),
        status: TaskStatus::UnderReview,
        operation: TaskOperation::RequestRedo,
    });
    if result != expected {
        bail!("expected {expected:?}, got {result:?}");
    }
    Ok(())
}

#[rstest]
fn admin_review_effects_leave_other_statuses_untouched(
    clock: DefaultClock,
    mut draft: LearningTask,
) {
    assert!(!draft.record_admin_review(&clock));
    assert!(!draft.withdraw_admin_reviews(&clock));
    assert_eq!(draft.status(), TaskStatus::Draft);
    assert_eq!(draft.version(), TaskVersion::INITIAL);
}

#[rstest]
fn content_is_frozen_during_moderation(
    clock: DefaultClock,
    mut draft: LearningTask,
) -> eyre::Result<()> {
    draft.submit(&clock)?;
    let result = draft.replace_content(sample_content().with_visibility(false), &clock);
    ensure!(result.is_err());
    ensure!(draft.content().is_public());
    ensure!(draft.ensure_owner_deletable().is_err());
    Ok(())
}
