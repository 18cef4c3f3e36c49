use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A question/answer card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub image_link: Option<String>,
    pub category: Option<String>,
    /// Alternate answers accepted in addition to `answer`
    pub expected_answers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub owned_by: Option<Uuid>,
    pub is_inverted: bool,
    pub has_inverted_child: bool,
    /// Card this one was inverted from; set only on inverted cards
    pub original_card_id: Option<Uuid>,
    /// Card this one is a sub-question of
    pub parent_id: Option<Uuid>,
}
