//! Review interval growth.

use serde::{Deserialize, Serialize};

/// Growth base applied on every correct answer, on top of the streak.
pub const GOLDEN_RATIO: f64 = 1.618;

/// Smallest interval ever scheduled.
pub const MIN_INTERVAL: i64 = 1;

/// Result of scheduling a card after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextInterval {
    /// Time until the next review, in seconds
    pub interval: i64,
    /// Consecutive correct answers, including this one
    pub streak: i64,
}

/// Map an accuracy ratio in `[0, 1]` onto a multiplier in `[0.5, 1.5]`.
pub fn ratio_multiplier(ratio: f64) -> f64 {
    let ratio = if ratio.is_nan() { 0.5 } else { ratio.clamp(0.0, 1.0) };
    0.5 + ratio
}

/// Compute the next review interval and answer streak.
///
/// # Arguments
///
/// * `current_interval` - Interval the card was scheduled with (seconds, >= 1)
/// * `streak` - Consecutive correct answers before this one (>= 0)
/// * `is_correct` - Whether this answer was correct
/// * `ratio` - The user's accuracy ratio after recording this answer
///
/// # Algorithm
///
/// With `m = 0.5 + ratio`:
///
/// * Correct: `streak + 1`, interval `floor(current * m * (1.618 + streak')) + 1`
/// * Incorrect: streak `0`, interval `floor(current / 2 * m) + 1`
///
/// The `+ 1` keeps every interval positive. Out-of-range input is clamped
/// rather than rejected, and growth saturates at `i64::MAX`.
pub fn next_interval(
    current_interval: i64,
    streak: i64,
    is_correct: bool,
    ratio: f64,
) -> NextInterval {
    let current = current_interval.max(MIN_INTERVAL) as f64;
    let multiplier = ratio_multiplier(ratio);

    if is_correct {
        let streak = streak.max(0).saturating_add(1);
        let grown = current * multiplier * (GOLDEN_RATIO + streak as f64);
        NextInterval {
            interval: floor_plus_one(grown),
            streak,
        }
    } else {
        NextInterval {
            interval: floor_plus_one(current / 2.0 * multiplier),
            streak: 0,
        }
    }
}

// Float-to-int `as` casts saturate, so huge products land on i64::MAX.
fn floor_plus_one(value: f64) -> i64 {
    (value.floor() as i64).saturating_add(1)
}
