//! Question/answer swapped sibling cards.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{SrsError, card::Card};

/// Pick the owner of a card: its `owned_by`, falling back to the user of any
/// schedule that references it.
pub fn resolve_owner(owned_by: Option<Uuid>, scheduled_user: Option<Uuid>) -> Option<Uuid> {
    owned_by.or(scheduled_user)
}

/// Whether `card` may get an inverted sibling.
///
/// An inverted card is already the reverse of its original, and an original
/// holds at most one inverted child.
pub fn ensure_invertible(card: &Card) -> Result<(), SrsError> {
    if card.is_inverted || card.has_inverted_child {
        return Err(SrsError::AlreadyInverted(card.id));
    }
    Ok(())
}

/// Build the inverted sibling of `original`, owned by `owner`.
pub fn invert(original: &Card, owner: Uuid, now: DateTime<Utc>) -> Result<Card, SrsError> {
    ensure_invertible(original)?;

    Ok(Card {
        id: Uuid::new_v4(),
        question: original.answer.clone(),
        answer: original.question.clone(),
        image_link: original.image_link.clone(),
        category: original.category.clone(),
        expected_answers: original.expected_answers.clone(),
        created_at: now,
        owned_by: Some(owner),
        is_inverted: true,
        has_inverted_child: false,
        original_card_id: Some(original.id),
        parent_id: original.parent_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(owned_by: Option<Uuid>) -> Card {
        Card {
            id: Uuid::new_v4(),
            question: "Capital of Portugal?".to_string(),
            answer: "Lisbon".to_string(),
            image_link: Some("https://img.example.com/lisbon.png".to_string()),
            category: Some("geography".to_string()),
            expected_answers: vec!["Lisboa".to_string()],
            created_at: Utc::now(),
            owned_by,
            is_inverted: false,
            has_inverted_child: false,
            original_card_id: None,
            parent_id: None,
        }
    }

    #[test]
    fn test_invert_swaps_question_and_answer() {
        let owner = Uuid::new_v4();
        let original = card(Some(owner));
        let now = Utc::now();

        let inverted = invert(&original, owner, now).unwrap();

        assert_ne!(inverted.id, original.id);
        assert_eq!(inverted.question, "Lisbon");
        assert_eq!(inverted.answer, "Capital of Portugal?");
        assert_eq!(inverted.image_link, original.image_link);
        assert_eq!(inverted.category, original.category);
        assert_eq!(inverted.expected_answers, original.expected_answers);
        assert!(inverted.is_inverted);
        assert!(!inverted.has_inverted_child);
        assert_eq!(inverted.original_card_id, Some(original.id));
        assert_eq!(inverted.owned_by, Some(owner));
        assert_eq!(inverted.created_at, now);
    }

    #[test]
    fn test_resolve_owner_fallback() {
        let owner = Uuid::new_v4();
        let scheduled = Uuid::new_v4();

        assert_eq!(resolve_owner(Some(owner), Some(scheduled)), Some(owner));
        assert_eq!(resolve_owner(None, Some(scheduled)), Some(scheduled));
        assert_eq!(resolve_owner(None, None), None);
    }

    #[test]
    fn test_inverted_cards_are_not_inverted_again() {
        let owner = Uuid::new_v4();
        let original = card(Some(owner));
        let inverted = invert(&original, owner, Utc::now()).unwrap();

        assert_eq!(
            invert(&inverted, owner, Utc::now()).unwrap_err(),
            SrsError::AlreadyInverted(inverted.id)
        );
    }

    #[test]
    fn test_one_inverted_child_per_card() {
        let mut original = card(None);
        original.has_inverted_child = true;

        assert!(matches!(
            invert(&original, Uuid::new_v4(), Utc::now()),
            Err(SrsError::AlreadyInverted(_))
        ));
    }
}
