use recallo_srs::UserStats;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::User;

pub async fn create_user<'e, E>(
    executor: E,
    username: &str,
    daily_goal_target: i32,
) -> Result<Uuid, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            INSERT INTO users (username, daily_goal_target)
            VALUES ($1, $2)
            RETURNING id
        "#,
    )
    .bind(username)
    .bind(daily_goal_target)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, username, score, correct_answers, wrong_answers, answers_ratio, gold,
                   current_gold_multiplier, current_daily_goal_id, streak, daily_goal_target, created_at
            FROM users
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Load a user and hold its row lock until the surrounding transaction ends.
///
/// Every multi-row update locks the user first, which serialises concurrent
/// answers from the same user.
pub async fn lock_by_id<'e, E>(executor: E, user_id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, username, score, correct_answers, wrong_answers, answers_ratio, gold,
                   current_gold_multiplier, current_daily_goal_id, streak, daily_goal_target, created_at
            FROM users
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Persist the scoring aggregate.
pub async fn save_stats<'e, E>(
    executor: E,
    user_id: Uuid,
    stats: &UserStats,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET score = $2,
                correct_answers = $3,
                wrong_answers = $4,
                answers_ratio = $5,
                gold = $6,
                current_gold_multiplier = $7,
                streak = $8,
                updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(stats.score)
    .bind(stats.answers.correct)
    .bind(stats.answers.wrong)
    .bind(stats.answers_ratio())
    .bind(stats.gold)
    .bind(stats.gold_multiplier)
    .bind(stats.streak)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_current_daily_goal<'e, E>(
    executor: E,
    user_id: Uuid,
    goal_id: Uuid,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET current_daily_goal_id = $2, updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(goal_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn update_daily_goal_target<'e, E>(
    executor: E,
    user_id: Uuid,
    daily_goal_target: i32,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE users
            SET daily_goal_target = $2, updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(user_id)
    .bind(daily_goal_target)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a user; schedules, goals and owned items cascade.
pub async fn delete_user<'e, E>(executor: E, user_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM users WHERE id = $1
        "#,
    )
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
