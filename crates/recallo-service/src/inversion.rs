use chrono::{DateTime, Utc};
use recallo_db::{
    models::{Card, UserCardSchedule},
    repositories::{card as card_repo, schedule as schedule_repo},
};
use recallo_srs::{ReviewSchedule, inversion};
use serde::Serialize;
use uuid::Uuid;

use crate::{ServiceState, error::ServiceError, metrics};

#[derive(Debug, Clone, Serialize)]
pub struct InvertedPair {
    pub original: Card,
    pub inverted: Card,
}

/// Create the question/answer swapped sibling of a card.
///
/// The sibling is owned by the card's owner, or failing that by the user of the
/// earliest schedule referencing the card, and is attached to that user with a
/// seed schedule. A card gets at most one inverted sibling and inverted cards
/// cannot be inverted again.
#[tracing::instrument(skip(state))]
pub async fn invert_card(
    state: &ServiceState,
    card_id: Uuid,
    now: DateTime<Utc>,
) -> Result<InvertedPair, ServiceError> {
    let mut tx = state.pool.begin().await?;

    let mut original = card_repo::lock_by_id(&mut *tx, card_id)
        .await?
        .ok_or(ServiceError::NotFound("card", card_id))?;

    let scheduled_user = match original.owned_by {
        Some(_) => None,
        None => schedule_repo::find_first_user_for_card(&mut *tx, card_id).await?,
    };
    let owner = inversion::resolve_owner(original.owned_by, scheduled_user)
        .ok_or(ServiceError::OwnerNotFound(card_id))?;

    let inverted = inversion::invert(&recallo_srs::Card::from(original.clone()), owner, now)?;

    // The row lock makes this race-free; the partial unique index backs it up.
    if !card_repo::mark_has_inverted_child(&mut *tx, card_id).await? {
        return Err(ServiceError::Conflict(format!(
            "card {card_id} already has an inverted child"
        )));
    }
    original.has_inverted_child = true;

    let inverted = card_repo::insert_card(&mut *tx, &Card::from(inverted)).await?;
    let schedule = ReviewSchedule::seed(owner, inverted.id, state.initial_interval_secs, now);
    schedule_repo::insert_schedule(&mut *tx, &UserCardSchedule::from(schedule)).await?;

    tx.commit().await?;

    metrics::record_card_inverted();
    tracing::info!(inverted_id = %inverted.id, owner = %owner, "Card inverted");

    Ok(InvertedPair { original, inverted })
}
