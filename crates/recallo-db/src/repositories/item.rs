use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Item, UserItem};

pub async fn create_item<'e, E>(
    executor: E,
    name: &str,
    price: i64,
    gold_multiplier_bonus: i64,
) -> Result<Item, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO items (name, price, gold_multiplier_bonus)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, gold_multiplier_bonus
        "#,
    )
    .bind(name)
    .bind(price)
    .bind(gold_multiplier_bonus)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, item_id: Uuid) -> Result<Option<Item>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, name, price, gold_multiplier_bonus
            FROM items
            WHERE id = $1
        "#,
    )
    .bind(item_id)
    .fetch_optional(executor)
    .await
}

pub async fn find_owned_level<'e, E>(
    executor: E,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<Option<i32>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT level
            FROM user_items
            WHERE user_id = $1 AND item_id = $2
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .fetch_optional(executor)
    .await
}

/// Set the owned level of an item, acquiring it if needed.
pub async fn upsert_owned_level<'e, E>(
    executor: E,
    user_id: Uuid,
    item_id: Uuid,
    level: i32,
) -> Result<UserItem, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO user_items (user_id, item_id, level)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, item_id)
            DO UPDATE SET level = $3, updated_at = NOW()
            RETURNING user_id, item_id, level
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .bind(level)
    .fetch_one(executor)
    .await
}

/// `(gold_multiplier_bonus, level)` of every item a user owns.
pub async fn owned_bonuses<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<(i64, i32)>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT i.gold_multiplier_bonus, ui.level
            FROM user_items ui
            JOIN items i ON i.id = ui.item_id
            WHERE ui.user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}
