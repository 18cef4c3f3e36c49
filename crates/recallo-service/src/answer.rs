//! Answer submission: the per-answer transaction.

use chrono::{DateTime, Utc};
use recallo_db::{
    models::{User, UserCardSchedule},
    repositories::{
        card as card_repo, daily_goal as goal_repo, schedule as schedule_repo, user as user_repo,
    },
};
use recallo_srs::{AnswerEffects, DailyGoal, ReviewSchedule, matching, review};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ServiceState, daily_goal::ensure_goal_in_tx, error::ServiceError, metrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub user_id: Uuid,
    pub card_id: Uuid,
    pub is_correct: bool,
}

/// State after an answer was committed.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub user: User,
    pub schedule: UserCardSchedule,
    pub effects: AnswerEffects,
    /// Today's goal, after any progress this answer made
    pub goal: DailyGoal,
}

/// Record one answer in a single transaction.
///
/// Locks the user row, then the schedule row, so concurrent answers from the
/// same user are applied one after the other. Today's goal is ensured before
/// the answer is applied; the interval that gets scored is the one the card had
/// when it was answered.
#[tracing::instrument(
    skip(state, submission),
    fields(
        user_id = %submission.user_id,
        card_id = %submission.card_id,
        is_correct = submission.is_correct
    )
)]
pub async fn submit_answer(
    state: &ServiceState,
    submission: AnswerSubmission,
    now: DateTime<Utc>,
) -> Result<AnswerOutcome, ServiceError> {
    let AnswerSubmission {
        user_id,
        card_id,
        is_correct,
    } = submission;

    let mut tx = state.pool.begin().await?;

    let mut user = user_repo::lock_by_id(&mut *tx, user_id)
        .await?
        .ok_or(ServiceError::NotFound("user", user_id))?;
    let mut schedule: ReviewSchedule = schedule_repo::lock(&mut *tx, user_id, card_id)
        .await?
        .ok_or(ServiceError::NotFound("card schedule", card_id))?
        .into();

    let target = user.daily_goal_target;
    let mut goal = ensure_goal_in_tx(&mut tx, &mut user, target, now).await?;

    let mut stats = user.stats();
    let effects = review::apply_answer(&mut stats, &mut schedule, Some(&mut goal), is_correct, now)?;

    let schedule = UserCardSchedule::from(schedule);
    schedule_repo::save(&mut *tx, &schedule).await?;
    user_repo::save_stats(&mut *tx, user.id, &stats).await?;
    goal_repo::save(&mut *tx, &goal).await?;

    tx.commit().await?;

    user.apply_stats(&stats);

    metrics::record_answer(is_correct);
    metrics::record_gold_earned("answer", effects.reward.gold);
    if let Some(progress) = effects.goal
        && progress.completed_now
    {
        metrics::record_goal_completed();
        metrics::record_gold_earned("daily_goal", progress.gold_reward);
        tracing::info!(
            gold = progress.gold_reward,
            streak = stats.streak,
            "Daily goal completed"
        );
    }

    tracing::debug!(
        interval = effects.next.interval,
        streak = effects.next.streak,
        ratio = effects.ratio,
        "Answer recorded"
    );

    Ok(AnswerOutcome {
        is_correct,
        user,
        schedule,
        effects,
        goal,
    })
}

/// Check a typed answer against the card, then record it.
pub async fn submit_typed_answer(
    state: &ServiceState,
    user_id: Uuid,
    card_id: Uuid,
    given: &str,
    now: DateTime<Utc>,
) -> Result<AnswerOutcome, ServiceError> {
    let card = card_repo::find_by_id(&state.pool, card_id)
        .await?
        .ok_or(ServiceError::NotFound("card", card_id))?;

    let is_correct = matching::is_correct_answer(&card.answer, &card.expected_answers, given);

    submit_answer(
        state,
        AnswerSubmission {
            user_id,
            card_id,
            is_correct,
        },
        now,
    )
    .await
}
