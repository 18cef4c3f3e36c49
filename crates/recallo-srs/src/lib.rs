//! Scheduling core for Recallo
//!
//! This crate holds the interval-scheduling and answer-scoring rules together with
//! the gamification side effects they drive (score, gold, daily goals, streaks).
//! Everything here is pure: callers load state, apply one of the operations below
//! and persist the result inside a single transaction.
//!
//! The per-answer flow is composed in [`review::apply_answer`]:
//!
//! 1. [`ratio::AnswerRatio`] records the answer and yields the user's accuracy ratio.
//! 2. [`interval::next_interval`] computes the new interval and answer streak.
//! 3. [`reward::on_correct_answer`] credits score and gold for correct answers.
//! 4. [`daily_goal::DailyGoal::increase_progress`] advances today's goal and pays
//!    the completion bonus.

pub mod card;
pub mod daily_goal;
pub mod interval;
pub mod inversion;
pub mod matching;
pub mod ratio;
pub mod review;
pub mod reward;
pub mod schedule;
pub mod user;

use thiserror::Error;
use uuid::Uuid;

pub use card::Card;
pub use daily_goal::{DailyGoal, GoalProgress, GoalStatus};
pub use interval::{NextInterval, next_interval};
pub use ratio::AnswerRatio;
pub use review::{AnswerEffects, apply_answer};
pub use reward::Reward;
pub use schedule::ReviewSchedule;
pub use user::UserStats;

/// Errors raised by the scheduling core.
///
/// Arithmetic (ratio, interval) never fails; these cover sequencing and
/// invariant violations only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SrsError {
    /// An operation was applied out of sequence, e.g. progress on another day's goal.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// A purchase costs more than the user holds; gold is left untouched.
    #[error("insufficient gold: {required} required, {available} available")]
    InsufficientGold { required: i64, available: i64 },
    /// The card is itself inverted or already has its inverted sibling.
    #[error("card {0} is already inverted or already has an inverted child")]
    AlreadyInverted(Uuid),
    /// A stored goal status is not one of `PENDING`, `COMPLETED` or `FAIL`.
    #[error("unknown daily goal status: {0}")]
    UnknownGoalStatus(String),
}
