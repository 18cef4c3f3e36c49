use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::Card;

pub async fn insert_card<'e, E>(executor: E, card: &Card) -> Result<Card, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO cards (id, question, answer, image_link, category, expected_answers,
                               owned_by, is_inverted, has_inverted_child, original_card_id,
                               parent_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, question, answer, image_link, category, expected_answers, created_at,
                      owned_by, is_inverted, has_inverted_child, original_card_id, parent_id
        "#,
    )
    .bind(card.id)
    .bind(&card.question)
    .bind(&card.answer)
    .bind(&card.image_link)
    .bind(&card.category)
    .bind(&card.expected_answers)
    .bind(card.owned_by)
    .bind(card.is_inverted)
    .bind(card.has_inverted_child)
    .bind(card.original_card_id)
    .bind(card.parent_id)
    .bind(card.created_at)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, card_id: Uuid) -> Result<Option<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, question, answer, image_link, category, expected_answers, created_at,
                   owned_by, is_inverted, has_inverted_child, original_card_id, parent_id
            FROM cards
            WHERE id = $1
        "#,
    )
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

/// Load a card and hold its row lock until the surrounding transaction ends.
pub async fn lock_by_id<'e, E>(executor: E, card_id: Uuid) -> Result<Option<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, question, answer, image_link, category, expected_answers, created_at,
                   owned_by, is_inverted, has_inverted_child, original_card_id, parent_id
            FROM cards
            WHERE id = $1
            FOR UPDATE
        "#,
    )
    .bind(card_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, card_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT EXISTS(SELECT 1 FROM cards WHERE id = $1)
        "#,
    )
    .bind(card_id)
    .fetch_one(executor)
    .await
}

/// Claim the single inverted-child slot of an original card.
///
/// Returns `false` if the card is itself inverted or the slot is already taken.
pub async fn mark_has_inverted_child<'e, E>(executor: E, card_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE cards
            SET has_inverted_child = TRUE, updated_at = NOW()
            WHERE id = $1 AND has_inverted_child = FALSE AND is_inverted = FALSE
        "#,
    )
    .bind(card_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn clear_has_inverted_child<'e, E>(executor: E, card_id: Uuid) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE cards
            SET has_inverted_child = FALSE, updated_at = NOW()
            WHERE id = $1
        "#,
    )
    .bind(card_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Delete a card and return it.
///
/// Schedules, sub-question cards and the inverted child cascade.
pub async fn delete_card<'e, E>(executor: E, card_id: Uuid) -> Result<Option<Card>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            DELETE FROM cards
            WHERE id = $1
            RETURNING id, question, answer, image_link, category, expected_answers, created_at,
                      owned_by, is_inverted, has_inverted_child, original_card_id, parent_id
        "#,
    )
    .bind(card_id)
    .fetch_optional(executor)
    .await
}
