use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interval::{MIN_INTERVAL, NextInterval, next_interval};

/// Interval given to a card when it is first attached to a user, in seconds.
pub const DEFAULT_SEED_INTERVAL: i64 = 60;

/// Per-(user, card) review state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSchedule {
    pub user_id: Uuid,
    pub card_id: Uuid,
    /// Seconds between `last_reviewed` and `next_review`, always >= 1
    pub interval: i64,
    pub answer_streak: i64,
    pub last_reviewed: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
}

impl ReviewSchedule {
    /// Schedule a freshly attached card.
    pub fn seed(user_id: Uuid, card_id: Uuid, seed_interval: i64, now: DateTime<Utc>) -> Self {
        let interval = seed_interval.max(MIN_INTERVAL);
        Self {
            user_id,
            card_id,
            interval,
            answer_streak: 0,
            last_reviewed: now,
            next_review: next_review_at(now, interval),
        }
    }

    /// Apply an answer, moving `last_reviewed` to `now`.
    pub fn reschedule(&mut self, is_correct: bool, ratio: f64, now: DateTime<Utc>) -> NextInterval {
        let next = next_interval(self.interval, self.answer_streak, is_correct, ratio);
        self.interval = next.interval;
        self.answer_streak = next.streak;
        self.last_reviewed = now;
        self.next_review = next_review_at(now, next.interval);
        next
    }
}

/// `last_reviewed + interval_secs`, clamped to the latest representable instant.
pub fn next_review_at(last_reviewed: DateTime<Utc>, interval_secs: i64) -> DateTime<Utc> {
    Duration::try_seconds(interval_secs)
        .and_then(|interval| last_reviewed.checked_add_signed(interval))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
