//! Daily goal lifecycle: opening today's goal, advancing it, history.

use chrono::{DateTime, Days, Utc};
use recallo_db::{
    models::User,
    repositories::{daily_goal as goal_repo, user as user_repo},
};
use recallo_srs::{
    DailyGoal, GoalProgress,
    daily_goal::{self, RollOver},
};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{ServiceState, error::ServiceError, metrics, validation};

/// Open (or fetch) the user's goal for the day of `now` inside `tx`.
///
/// `user` must already be locked by `tx`; that lock is what serialises every
/// writer of the user's goals. When the user's current goal is from an earlier
/// day it is rolled over first, which may fail it and reset the streak on
/// `user`. The caller persists `user`'s stats.
pub(crate) async fn ensure_goal_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    user: &mut User,
    target: i32,
    now: DateTime<Utc>,
) -> Result<DailyGoal, ServiceError> {
    let today = daily_goal::goal_date(now);

    goal_repo::insert_if_absent(&mut **tx, user.id, today, target).await?;
    let goal: DailyGoal = goal_repo::find_for_day(&mut **tx, user.id, today)
        .await?
        .ok_or_else(|| ServiceError::InvalidState(format!("daily goal for {today} vanished")))?
        .try_into()?;

    if user.current_daily_goal_id == Some(goal.id) {
        return Ok(goal);
    }

    if let Some(previous_id) = user.current_daily_goal_id
        && let Some(row) = goal_repo::lock_by_id(&mut **tx, previous_id).await?
    {
        let mut previous = DailyGoal::try_from(row)?;
        let mut stats = user.stats();

        let outcome = daily_goal::roll_over(&mut previous, &mut stats, today, now);
        if outcome == RollOver::Failed {
            goal_repo::save(&mut **tx, &previous).await?;
            metrics::record_goals_failed(1);
        }
        if outcome != RollOver::Kept {
            tracing::debug!(
                user_id = %user.id,
                previous_goal = %previous.id,
                ?outcome,
                "Previous daily goal rolled over"
            );
        }
        user.apply_stats(&stats);
    }

    user_repo::set_current_daily_goal(&mut **tx, user.id, goal.id).await?;
    user.current_daily_goal_id = Some(goal.id);

    Ok(goal)
}

/// Ensure the user has a goal for the UTC day of `now` and make it current.
///
/// Idempotent: concurrent calls for the same user and day return the same
/// goal. `target` defaults to the user's profile setting and only applies when
/// the goal is created.
#[tracing::instrument(skip(state))]
pub async fn ensure_goal_for_today(
    state: &ServiceState,
    user_id: Uuid,
    target: Option<i32>,
    now: DateTime<Utc>,
) -> Result<DailyGoal, ServiceError> {
    if let Some(target) = target {
        validation::validate_daily_goal_target(target)?;
    }

    let mut tx = state.pool.begin().await?;

    let mut user = user_repo::lock_by_id(&mut *tx, user_id)
        .await?
        .ok_or(ServiceError::NotFound("user", user_id))?;
    let target = target.unwrap_or(user.daily_goal_target);

    let goal = ensure_goal_in_tx(&mut tx, &mut user, target, now).await?;
    user_repo::save_stats(&mut *tx, user.id, &user.stats()).await?;

    tx.commit().await?;

    Ok(goal)
}

/// Add `increment` to the user's current goal.
///
/// Fails with [`ServiceError::InvalidState`] when the user has no current goal,
/// or when it belongs to an earlier day.
#[tracing::instrument(skip(state))]
pub async fn increase_daily_goal_progress(
    state: &ServiceState,
    user_id: Uuid,
    increment: i32,
    now: DateTime<Utc>,
) -> Result<GoalProgress, ServiceError> {
    validation::validate_progress_increment(increment)?;

    let mut tx = state.pool.begin().await?;

    let user = user_repo::lock_by_id(&mut *tx, user_id)
        .await?
        .ok_or(ServiceError::NotFound("user", user_id))?;

    let mut goal = match user.current_daily_goal_id {
        Some(goal_id) => goal_repo::lock_by_id(&mut *tx, goal_id)
            .await?
            .map(DailyGoal::try_from)
            .transpose()?,
        None => None,
    };

    if let Some(goal) = &goal
        && goal.date != daily_goal::goal_date(now)
    {
        return Err(ServiceError::InvalidState(format!(
            "current daily goal belongs to {}",
            goal.date
        )));
    }

    let mut stats = user.stats();
    let progress = daily_goal::increase_progress(goal.as_mut(), &mut stats, increment, now)?;

    if let Some(goal) = &goal {
        goal_repo::save(&mut *tx, goal).await?;
    }
    user_repo::save_stats(&mut *tx, user.id, &stats).await?;

    tx.commit().await?;

    if progress.completed_now {
        metrics::record_goal_completed();
        metrics::record_gold_earned("daily_goal", progress.gold_reward);
        tracing::info!(
            user_id = %user_id,
            gold = progress.gold_reward,
            streak = stats.streak,
            "Daily goal completed"
        );
    }

    Ok(progress)
}

/// The user's goals of the last `days` days (today included), newest first.
pub async fn goal_history(
    state: &ServiceState,
    user_id: Uuid,
    days: u32,
    now: DateTime<Utc>,
) -> Result<Vec<DailyGoal>, ServiceError> {
    let today = daily_goal::goal_date(now);
    let since = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(today);

    goal_repo::list_for_user(&state.pool, user_id, since)
        .await?
        .into_iter()
        .map(|row| DailyGoal::try_from(row).map_err(ServiceError::from))
        .collect()
}
