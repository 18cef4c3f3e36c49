//! Lifetime answer-accuracy estimator.

use serde::{Deserialize, Serialize};

/// Ratio reported before a user has answered anything.
pub const NEUTRAL_RATIO: f64 = 0.5;

/// Running correct/wrong counters for one user.
///
/// The ratio is a plain lifetime frequency (no decay), so users who stay
/// accurate over their whole history get the largest interval growth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRatio {
    pub correct: i64,
    pub wrong: i64,
}

impl AnswerRatio {
    /// Restore counters loaded from storage.
    pub const fn new(correct: i64, wrong: i64) -> Self {
        Self { correct, wrong }
    }

    /// Record one answer and return the updated ratio.
    pub fn record(&mut self, is_correct: bool) -> f64 {
        if is_correct {
            self.correct = self.correct.saturating_add(1);
        } else {
            self.wrong = self.wrong.saturating_add(1);
        }
        self.ratio()
    }

    /// Answers recorded so far; negative counters count as zero.
    ///
    /// ```
    /// use recallo_srs::AnswerRatio;
    ///
    /// let mut ratio = AnswerRatio::new(3, 1);
    /// assert_eq!(ratio.total(), 4);
    /// assert_eq!(ratio.record(false), 0.6);
    /// assert_eq!(AnswerRatio::new(-2, 5).total(), 5);
    /// ```
    pub fn total(&self) -> i64 {
        self.correct.max(0).saturating_add(self.wrong.max(0))
    }

    /// `correct / (correct + wrong)`, or [`NEUTRAL_RATIO`] with no answers yet.
    ///
    /// Always within `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return NEUTRAL_RATIO;
        }
        (self.correct.max(0) as f64 / total as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_prior_without_answers() {
        let ratio = AnswerRatio::default();
        assert_eq!(ratio.ratio(), NEUTRAL_RATIO);
        assert_eq!(ratio.total(), 0);
    }

    #[test]
    fn test_record_updates_counters() {
        let mut ratio = AnswerRatio::default();

        assert_eq!(ratio.record(true), 1.0);
        assert_eq!(ratio.record(false), 0.5);
        assert_eq!(ratio.record(false), 1.0 / 3.0);
        assert_eq!(ratio, AnswerRatio::new(1, 2));
    }

    #[test]
    fn test_all_wrong_is_zero() {
        let mut ratio = AnswerRatio::default();
        for _ in 0..4 {
            ratio.record(false);
        }
        assert_eq!(ratio.ratio(), 0.0);
    }

    #[test]
    fn test_ratio_stays_in_bounds() {
        for correct in 0..30 {
            for wrong in 0..30 {
                let r = AnswerRatio::new(correct, wrong).ratio();
                assert!((0.0..=1.0).contains(&r), "{correct}/{wrong} gave {r}");
            }
        }

        // Corrupted (negative) counters from storage are treated as zero
        let r = AnswerRatio::new(-3, 2).ratio();
        assert_eq!(r, 0.0);
        assert_eq!(AnswerRatio::new(-1, -1).ratio(), NEUTRAL_RATIO);
    }
}
