//! Score and gold credited for a correct answer.

use serde::{Deserialize, Serialize};

use crate::user::UserStats;

/// Gold credited per correct answer, before the user's multiplier.
pub const GOLD_PER_CORRECT_ANSWER: i64 = 1;

/// Daily-goal progress added by one correct answer.
pub const GOAL_PROGRESS_PER_CORRECT_ANSWER: i32 = 1;

/// Side effects granted for one answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub score: i64,
    pub gold: i64,
    /// Progress to forward to the user's daily goal
    pub goal_progress: i32,
}

impl Reward {
    /// What an incorrect answer earns.
    pub const NONE: Self = Self {
        score: 0,
        gold: 0,
        goal_progress: 0,
    };
}

/// Credit score and gold for a correct answer.
///
/// `scored_interval` is the card's interval *before* it is rescheduled, so the
/// score reflects how long the user actually retained the card.
///
/// Gold is `GOLD_PER_CORRECT_ANSWER * gold_multiplier`.
pub fn on_correct_answer(user: &mut UserStats, scored_interval: i64) -> Reward {
    let score = scored_interval.max(0);
    user.credit_score(score);
    let gold = user.earn_gold(GOLD_PER_CORRECT_ANSWER);

    Reward {
        score,
        gold,
        goal_progress: GOAL_PROGRESS_PER_CORRECT_ANSWER,
    }
}
