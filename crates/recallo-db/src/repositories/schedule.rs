use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{DueCard, UserCardSchedule};

/// Attach a card to a user. No-op if the schedule already exists.
///
/// Returns whether a row was inserted.
pub async fn insert_schedule<'e, E>(
    executor: E,
    schedule: &UserCardSchedule,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            INSERT INTO user_card_schedules (user_id, card_id, interval_secs, answer_streak, last_reviewed, next_review)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, card_id) DO NOTHING
        "#,
    )
    .bind(schedule.user_id)
    .bind(schedule.card_id)
    .bind(schedule.interval_secs)
    .bind(schedule.answer_streak)
    .bind(schedule.last_reviewed)
    .bind(schedule.next_review)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Load a schedule and hold its row lock until the surrounding transaction ends.
pub async fn lock<'e, E>(
    executor: E,
    user_id: Uuid,
    card_id: Uuid,
) -> Result<Option<UserCardSchedule>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT user_id, card_id, interval_secs, answer_streak, last_reviewed, next_review
            FROM user_card_schedules
            WHERE user_id = $1 AND card_id = $2
            FOR UPDATE
        "#,
    )
    .bind(user_id)
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

pub async fn save<'e, E>(executor: E, schedule: &UserCardSchedule) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE user_card_schedules
            SET interval_secs = $3,
                answer_streak = $4,
                last_reviewed = $5,
                next_review = $6,
                updated_at = NOW()
            WHERE user_id = $1 AND card_id = $2
        "#,
    )
    .bind(schedule.user_id)
    .bind(schedule.card_id)
    .bind(schedule.interval_secs)
    .bind(schedule.answer_streak)
    .bind(schedule.last_reviewed)
    .bind(schedule.next_review)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// User of the earliest schedule referencing a card, used when the card has no owner.
pub async fn find_first_user_for_card<'e, E>(
    executor: E,
    card_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT user_id
            FROM user_card_schedules
            WHERE card_id = $1
            ORDER BY created_at, user_id
            LIMIT 1
        "#,
    )
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

/// Cards whose next review is at or before `now`, most overdue first.
pub async fn due_cards<'e, E>(
    executor: E,
    user_id: Uuid,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<DueCard>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT
                c.id as card_id,
                c.question,
                c.image_link,
                c.category,
                s.interval_secs,
                s.answer_streak,
                s.next_review
            FROM user_card_schedules s
            JOIN cards c ON c.id = s.card_id
            WHERE s.user_id = $1 AND s.next_review <= $2
            ORDER BY s.next_review
            LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
}
