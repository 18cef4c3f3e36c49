use recallo_db::repositories::{item as item_repo, user as user_repo};
use recallo_srs::user::{gold_multiplier_for_items, next_level_price};
use serde::Serialize;
use uuid::Uuid;

use crate::{ServiceState, error::ServiceError, metrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Purchase {
    pub item_id: Uuid,
    /// Level owned after the purchase
    pub level: i32,
    pub price: i64,
    pub gold_left: i64,
    pub gold_multiplier: i64,
}

/// Buy an item, or its next level if the user already owns it.
///
/// Upgrading from level `n` costs `price * (n + 1)`. The user's gold
/// multiplier is recomputed from everything they own afterwards.
#[tracing::instrument(skip(state))]
pub async fn buy_item(
    state: &ServiceState,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<Purchase, ServiceError> {
    let mut tx = state.pool.begin().await?;

    let user = user_repo::lock_by_id(&mut *tx, user_id)
        .await?
        .ok_or(ServiceError::NotFound("user", user_id))?;
    let item = item_repo::find_by_id(&mut *tx, item_id)
        .await?
        .ok_or(ServiceError::NotFound("item", item_id))?;

    let owned_level = item_repo::find_owned_level(&mut *tx, user_id, item_id).await?;
    let price = next_level_price(item.price, owned_level);

    let mut stats = user.stats();
    stats.spend_gold(price)?;

    let level = owned_level.unwrap_or(0).saturating_add(1);
    item_repo::upsert_owned_level(&mut *tx, user_id, item_id, level).await?;

    let owned = item_repo::owned_bonuses(&mut *tx, user_id).await?;
    stats.gold_multiplier = gold_multiplier_for_items(owned);

    user_repo::save_stats(&mut *tx, user_id, &stats).await?;

    tx.commit().await?;

    metrics::record_item_bought(level);
    tracing::info!(
        item = %item.name,
        level,
        price,
        gold_multiplier = stats.gold_multiplier,
        "Item bought"
    );

    Ok(Purchase {
        item_id,
        level,
        price,
        gold_left: stats.gold,
        gold_multiplier: stats.gold_multiplier,
    })
}
