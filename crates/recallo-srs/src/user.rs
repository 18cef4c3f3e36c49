//! User aggregate for everything the scheduling core mutates.
//!
//! Every write to score, answer counters, gold or streak goes through one of
//! the commands on [`UserStats`], so the persistence layer only ever loads the
//! aggregate, applies commands and saves it back.

use serde::{Deserialize, Serialize};

use crate::{SrsError, ratio::AnswerRatio};

/// Multiplier of a user who owns no items.
pub const BASE_GOLD_MULTIPLIER: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Cumulative score, never decreases
    pub score: i64,
    pub answers: AnswerRatio,
    /// Spendable currency, never negative
    pub gold: i64,
    pub gold_multiplier: i64,
    /// Consecutive completed daily goals
    pub streak: i64,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            score: 0,
            answers: AnswerRatio::default(),
            gold: 0,
            gold_multiplier: BASE_GOLD_MULTIPLIER,
            streak: 0,
        }
    }
}

impl UserStats {
    /// Record an answer and return the updated accuracy ratio.
    pub fn record_answer(&mut self, is_correct: bool) -> f64 {
        self.answers.record(is_correct)
    }

    pub fn answers_ratio(&self) -> f64 {
        self.answers.ratio()
    }

    pub fn credit_score(&mut self, points: i64) {
        self.score = self.score.saturating_add(points.max(0));
    }

    /// Credit `amount * gold_multiplier` and return what was credited.
    pub fn earn_gold(&mut self, amount: i64) -> i64 {
        let earned = amount
            .max(0)
            .saturating_mul(self.gold_multiplier.max(BASE_GOLD_MULTIPLIER));
        self.credit_gold(earned);
        earned
    }

    /// Credit an already multiplied amount.
    pub fn credit_gold(&mut self, amount: i64) {
        self.gold = self.gold.saturating_add(amount.max(0));
    }

    pub fn spend_gold(&mut self, price: i64) -> Result<(), SrsError> {
        if price < 0 {
            return Err(SrsError::InvalidState(format!(
                "cannot spend a negative amount of gold ({price})"
            )));
        }
        if price > self.gold {
            return Err(SrsError::InsufficientGold {
                required: price,
                available: self.gold,
            });
        }
        self.gold -= price;
        Ok(())
    }

    /// Count one more completed daily goal and return the new streak.
    pub fn extend_streak(&mut self) -> i64 {
        self.streak = self.streak.max(0).saturating_add(1);
        self.streak
    }

    pub fn reset_streak(&mut self) {
        self.streak = 0;
    }
}

/// Derive the gold multiplier from owned items as `(bonus, level)` pairs.
///
/// `1 + sum(bonus * level)`; items with non-positive levels or bonuses are ignored.
pub fn gold_multiplier_for_items<I>(items: I) -> i64
where
    I: IntoIterator<Item = (i64, i32)>,
{
    items
        .into_iter()
        .filter(|(bonus, level)| *bonus > 0 && *level > 0)
        .fold(BASE_GOLD_MULTIPLIER, |acc, (bonus, level)| {
            acc.saturating_add(bonus.saturating_mul(i64::from(level)))
        })
}

/// Price of the next level of an item.
///
/// The first purchase costs `base_price`; upgrading from level `n` costs
/// `base_price * (n + 1)`.
pub fn next_level_price(base_price: i64, owned_level: Option<i32>) -> i64 {
    match owned_level {
        Some(level) if level > 0 => base_price.saturating_mul(i64::from(level) + 1),
        _ => base_price,
    }
}
