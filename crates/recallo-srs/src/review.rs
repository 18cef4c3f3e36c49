//! One answer, end to end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    SrsError,
    daily_goal::{self, DailyGoal, GoalProgress},
    interval::NextInterval,
    reward::{self, Reward},
    schedule::ReviewSchedule,
    user::UserStats,
};

/// Everything an answer changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerEffects {
    /// User's accuracy ratio after this answer
    pub ratio: f64,
    /// Interval the card had when it was answered (the one that was scored)
    pub previous_interval: i64,
    pub next: NextInterval,
    pub reward: Reward,
    /// Daily-goal outcome, for correct answers only
    pub goal: Option<GoalProgress>,
}

/// Apply an answer to the user aggregate, the card schedule and the daily goal.
///
/// Order: ratio, interval and streak, score and gold, daily-goal progress. A
/// correct answer requires an active goal; that precondition is checked before
/// anything is mutated, so an error leaves all three untouched.
pub fn apply_answer(
    user: &mut UserStats,
    schedule: &mut ReviewSchedule,
    goal: Option<&mut DailyGoal>,
    is_correct: bool,
    now: DateTime<Utc>,
) -> Result<AnswerEffects, SrsError> {
    if is_correct && goal.is_none() {
        return Err(SrsError::InvalidState(
            "correct answer submitted before the daily goal was ensured".to_string(),
        ));
    }

    let ratio = user.record_answer(is_correct);
    let previous_interval = schedule.interval;
    let next = schedule.reschedule(is_correct, ratio, now);

    if !is_correct {
        return Ok(AnswerEffects {
            ratio,
            previous_interval,
            next,
            reward: Reward::NONE,
            goal: None,
        });
    }

    let reward = reward::on_correct_answer(user, previous_interval);
    let goal = daily_goal::increase_progress(goal, user, reward.goal_progress, now)?;

    Ok(AnswerEffects {
        ratio,
        previous_interval,
        next,
        reward,
        goal: Some(goal),
    })
}
