use chrono::NaiveDate;
use recallo_srs::DailyGoal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{DailyGoalRow, ExpiredGoal};

/// Insert a PENDING goal for the user's day unless one already exists.
///
/// Relies on the `(user_id, goal_date)` unique constraint, so concurrent first
/// calls for the same day never create two rows. Returns whether a row was
/// inserted; either way [`find_for_day`] returns the single goal afterwards.
pub async fn insert_if_absent<'e, E>(
    executor: E,
    user_id: Uuid,
    goal_date: NaiveDate,
    target: i32,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO daily_goals (user_id, goal_date, target)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, goal_date) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(goal_date)
    .bind(target)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn find_for_day<'e, E>(
    executor: E,
    user_id: Uuid,
    goal_date: NaiveDate,
) -> Result<Option<DailyGoalRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, goal_date, target, progress, status, closed_at
            FROM daily_goals
            WHERE user_id = $1 AND goal_date = $2
        "#,
    )
    .bind(user_id)
    .bind(goal_date)
    .fetch_optional(executor)
    .await
}

/// Load a goal and hold its row lock; callers lock the owning user first.
pub async fn lock_by_id<'e, E>(executor: E, goal_id: Uuid) -> Result<Option<DailyGoalRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, goal_date, target, progress, status, closed_at
            FROM daily_goals
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(goal_id)
    .fetch_optional(executor)
    .await
}

pub async fn save<'e, E>(executor: E, goal: &DailyGoal) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE daily_goals
            SET progress = $2,
                status = $3,
                closed_at = $4,
                updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(goal.id)
    .bind(goal.progress)
    .bind(goal.status.as_str())
    .bind(goal.closed_at)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Pending goals of days before `today`, oldest first.
pub async fn list_expired_pending<'e, E>(
    executor: E,
    today: NaiveDate,
    limit: i64,
) -> Result<Vec<ExpiredGoal>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id
            FROM daily_goals
            WHERE status = 'PENDING' AND goal_date < $1
            ORDER BY goal_date
            LIMIT $2
        "#,
    )
    .bind(today)
    .bind(limit)
    .fetch_all(executor)
    .await
}

/// A user's goals from `since` on, newest first.
pub async fn list_for_user<'e, E>(
    executor: E,
    user_id: Uuid,
    since: NaiveDate,
) -> Result<Vec<DailyGoalRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, goal_date, target, progress, status, closed_at
            FROM daily_goals
            WHERE user_id = $1 AND goal_date >= $2
            ORDER BY goal_date DESC
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(executor)
    .await
}
