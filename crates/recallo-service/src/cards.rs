//! Card lifecycle: creation, attaching to users, deletion, due lists.

use chrono::{DateTime, Utc};
use recallo_db::{
    models::{Card, DueCard, UserCardSchedule},
    repositories::{card as card_repo, schedule as schedule_repo, user as user_repo},
};
use recallo_srs::ReviewSchedule;
use serde::Deserialize;
use uuid::Uuid;

use crate::{ServiceState, error::ServiceError, validation};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCard {
    pub question: String,
    pub answer: String,
    pub image_link: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub expected_answers: Vec<String>,
    /// Card this one is a sub-question of
    pub parent_id: Option<Uuid>,
}

impl NewCard {
    fn validate(&self) -> Result<(), ServiceError> {
        validation::validate_question(&self.question)?;
        validation::validate_answer(&self.answer)?;
        validation::validate_image_link(self.image_link.as_deref())?;
        validation::validate_category(self.category.as_deref())?;
        validation::validate_expected_answers(&self.expected_answers)?;
        Ok(())
    }
}

/// Create a card owned by `owner` and attach it to them.
#[tracing::instrument(skip(state, new_card))]
pub async fn create_card(
    state: &ServiceState,
    owner: Uuid,
    new_card: NewCard,
    now: DateTime<Utc>,
) -> Result<Card, ServiceError> {
    new_card.validate()?;

    let mut tx = state.pool.begin().await?;

    if user_repo::find_by_id(&mut *tx, owner).await?.is_none() {
        return Err(ServiceError::NotFound("user", owner));
    }
    if let Some(parent_id) = new_card.parent_id
        && !card_repo::exists(&mut *tx, parent_id).await?
    {
        return Err(ServiceError::NotFound("parent card", parent_id));
    }

    let card = Card {
        id: Uuid::new_v4(),
        question: new_card.question,
        answer: new_card.answer,
        image_link: new_card.image_link,
        category: new_card.category,
        expected_answers: new_card.expected_answers,
        created_at: now,
        owned_by: Some(owner),
        is_inverted: false,
        has_inverted_child: false,
        original_card_id: None,
        parent_id: new_card.parent_id,
    };
    let card = card_repo::insert_card(&mut *tx, &card).await?;

    let schedule = ReviewSchedule::seed(owner, card.id, state.initial_interval_secs, now);
    schedule_repo::insert_schedule(&mut *tx, &UserCardSchedule::from(schedule)).await?;

    tx.commit().await?;

    tracing::debug!(card_id = %card.id, "Card created");
    Ok(card)
}

/// Give a user a seed schedule for a card.
///
/// Returns `false` if the card was already attached; its schedule is left as is.
#[tracing::instrument(skip(state))]
pub async fn attach_card(
    state: &ServiceState,
    user_id: Uuid,
    card_id: Uuid,
    now: DateTime<Utc>,
) -> Result<bool, ServiceError> {
    if user_repo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(ServiceError::NotFound("user", user_id));
    }
    if !card_repo::exists(&state.pool, card_id).await? {
        return Err(ServiceError::NotFound("card", card_id));
    }

    let schedule = ReviewSchedule::seed(user_id, card_id, state.initial_interval_secs, now);
    let attached = schedule_repo::insert_schedule(&state.pool, &UserCardSchedule::from(schedule)).await?;
    Ok(attached)
}

/// Delete a card along with its schedules, sub-questions and inverted child.
///
/// Deleting an inverted card frees its original for a new inversion.
#[tracing::instrument(skip(state))]
pub async fn delete_card(state: &ServiceState, card_id: Uuid) -> Result<Card, ServiceError> {
    let mut tx = state.pool.begin().await?;

    let card = card_repo::delete_card(&mut *tx, card_id)
        .await?
        .ok_or(ServiceError::NotFound("card", card_id))?;

    if let Some(original_id) = card.original_card_id {
        card_repo::clear_has_inverted_child(&mut *tx, original_id).await?;
    }

    tx.commit().await?;

    tracing::debug!("Card deleted");
    Ok(card)
}

/// Cards due for the user at `now`, most overdue first.
pub async fn due_cards(
    state: &ServiceState,
    user_id: Uuid,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<DueCard>, ServiceError> {
    validation::validate_due_cards_limit(limit)?;
    Ok(schedule_repo::due_cards(&state.pool, user_id, now, limit).await?)
}
