//! Daily review quota state machine.
//!
//! A goal starts `Pending` and moves to `Completed` exactly once, when its
//! progress reaches the target. `Fail` is only entered by the end-of-day sweep
//! for goals left pending on a previous day.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{SrsError, user::UserStats};

/// Base gold paid for completing a daily goal, scaled by multiplier and streak.
pub const GOAL_COMPLETION_GOLD: i64 = 100;

/// Lifecycle of a daily goal. Only `Pending` accepts progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    /// Open for today's answers.
    Pending,
    /// Target reached; the completion bonus has been paid.
    Completed,
    /// Left pending past its day.
    Fail,
}

impl GoalStatus {
    /// Stored form of the status.
    ///
    /// ```
    /// use recallo_srs::GoalStatus;
    ///
    /// assert_eq!(GoalStatus::Fail.as_str(), "FAIL");
    /// assert_eq!("COMPLETED".parse(), Ok(GoalStatus::Completed));
    /// ```
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = SrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "COMPLETED" => Ok(Self::Completed),
            "FAIL" => Ok(Self::Fail),
            other => Err(SrsError::UnknownGoalStatus(other.to_string())),
        }
    }
}

/// One user's review quota for one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Calendar day the goal covers
    pub date: NaiveDate,
    /// Reviews required
    pub target: i32,
    /// Reviews done so far, never above `target`
    pub progress: i32,
    pub status: GoalStatus,
    /// Set when the goal leaves `Pending`
    pub closed_at: Option<DateTime<Utc>>,
}

/// Outcome of adding progress to a goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub progress: i32,
    /// Whether this call completed the goal
    pub completed_now: bool,
    /// Bonus gold paid by this call
    pub gold_reward: i64,
}

impl DailyGoal {
    pub fn new(user_id: Uuid, date: NaiveDate, target: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            target: target.max(1),
            progress: 0,
            status: GoalStatus::Pending,
            closed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    /// Add progress and settle completion.
    ///
    /// When progress reaches the target on a pending goal the goal completes,
    /// the user's streak grows by one and `100 * gold_multiplier * streak` gold
    /// is credited. Completed and failed goals ignore further progress, so the
    /// bonus is paid at most once.
    pub fn increase_progress(
        &mut self,
        user: &mut UserStats,
        increment: i32,
        now: DateTime<Utc>,
    ) -> GoalProgress {
        if self.status != GoalStatus::Pending || increment <= 0 {
            return GoalProgress {
                progress: self.progress,
                ..GoalProgress::default()
            };
        }

        self.progress = self.progress.saturating_add(increment).min(self.target);

        // `>=` rather than `==` so larger increments cannot skip past the target
        if self.progress < self.target {
            return GoalProgress {
                progress: self.progress,
                ..GoalProgress::default()
            };
        }

        self.status = GoalStatus::Completed;
        self.closed_at = Some(now);

        let streak = user.extend_streak();
        let gold_reward = GOAL_COMPLETION_GOLD
            .saturating_mul(user.gold_multiplier)
            .saturating_mul(streak);
        user.credit_gold(gold_reward);

        GoalProgress {
            progress: self.progress,
            completed_now: true,
            gold_reward,
        }
    }

    /// Close a goal that was left pending; breaks the user's streak.
    ///
    /// Returns `false` when the goal was already closed.
    pub fn fail(&mut self, user: &mut UserStats, now: DateTime<Utc>) -> bool {
        if self.status != GoalStatus::Pending {
            return false;
        }
        self.status = GoalStatus::Fail;
        self.closed_at = Some(now);
        user.reset_streak();
        true
    }
}

/// Advance the user's active goal.
///
/// Fails with [`SrsError::InvalidState`] when there is no active goal: callers
/// must ensure today's goal exists first.
pub fn increase_progress(
    goal: Option<&mut DailyGoal>,
    user: &mut UserStats,
    increment: i32,
    now: DateTime<Utc>,
) -> Result<GoalProgress, SrsError> {
    let goal = goal.ok_or_else(|| {
        SrsError::InvalidState("daily goal progress increased without an active goal".to_string())
    })?;
    Ok(goal.increase_progress(user, increment, now))
}

/// The calendar day a goal created at `now` belongs to.
pub fn goal_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// What happened to the previous goal when a new day's goal was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOver {
    /// Previous goal was completed yesterday; the streak carries on
    Kept,
    /// Previous goal was still pending and has been failed
    Failed,
    /// Previous goal was completed, but at least one day was skipped since
    StreakBroken,
}

/// Close out the user's previous goal before opening the goal for `today`.
///
/// The streak only survives if the previous goal was completed on the day
/// before `today`.
pub fn roll_over(
    previous: &mut DailyGoal,
    user: &mut UserStats,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> RollOver {
    if previous.date >= today {
        return RollOver::Kept;
    }
    if previous.fail(user, now) {
        return RollOver::Failed;
    }
    if previous.is_completed() && today.pred_opt() == Some(previous.date) {
        return RollOver::Kept;
    }
    user.reset_streak();
    RollOver::StreakBroken
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 2, 18, 30, 0).unwrap()
    }

    fn goal(target: i32, progress: i32) -> DailyGoal {
        DailyGoal {
            progress,
            ..DailyGoal::new(Uuid::new_v4(), goal_date(now()), target)
        }
    }

    #[test]
    fn test_new_goal_is_pending() {
        let goal = DailyGoal::new(Uuid::new_v4(), goal_date(now()), 10);
        assert_eq!(goal.status, GoalStatus::Pending);
        assert_eq!(goal.progress, 0);
        assert_eq!(goal.closed_at, None);
        assert_eq!(goal.date, NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
    }

    #[test]
    fn test_progress_below_target() {
        let mut user = UserStats::default();
        let mut goal = goal(5, 1);

        let result = goal.increase_progress(&mut user, 1, now());

        assert_eq!(result.progress, 2);
        assert!(!result.completed_now);
        assert_eq!(goal.status, GoalStatus::Pending);
        assert_eq!(user.streak, 0);
        assert_eq!(user.gold, 0);
    }

    #[test]
    fn test_completion_pays_gold() {
        let mut user = UserStats {
            gold_multiplier: 2,
            streak: 0,
            ..UserStats::default()
        };
        let mut goal = goal(5, 4);

        let result = goal.increase_progress(&mut user, 1, now());

        assert_eq!(
            result,
            GoalProgress {
                progress: 5,
                completed_now: true,
                gold_reward: 200
            }
        );
        assert_eq!(goal.status, GoalStatus::Completed);
        assert_eq!(goal.closed_at, Some(now()));
        assert_eq!(user.streak, 1);
        assert_eq!(user.gold, 200);
    }

    #[test]
    fn test_completion_fires_once() {
        let mut user = UserStats::default();
        let mut goal = goal(2, 1);

        assert!(goal.increase_progress(&mut user, 1, now()).completed_now);
        let gold = user.gold;

        for _ in 0..3 {
            let result = goal.increase_progress(&mut user, 1, now());
            assert!(!result.completed_now);
            assert_eq!(result.gold_reward, 0);
        }
        assert_eq!(goal.progress, 2);
        assert_eq!(user.streak, 1);
        assert_eq!(user.gold, gold);
    }

    #[test]
    fn test_overshooting_increment_still_completes() {
        let mut user = UserStats::default();
        let mut goal = goal(3, 2);

        let result = goal.increase_progress(&mut user, 5, now());

        assert!(result.completed_now);
        assert_eq!(goal.progress, 3);
    }

    #[test]
    fn test_bonus_scales_with_streak() {
        let mut user = UserStats {
            gold_multiplier: 3,
            streak: 4,
            ..UserStats::default()
        };
        let mut goal = goal(1, 0);

        let result = goal.increase_progress(&mut user, 1, now());

        assert_eq!(user.streak, 5);
        assert_eq!(result.gold_reward, 100 * 3 * 5);
    }

    #[test]
    fn test_missing_goal_is_invalid_state() {
        let mut user = UserStats::default();
        let err = increase_progress(None, &mut user, 1, now()).unwrap_err();
        assert!(matches!(err, SrsError::InvalidState(_)));
    }

    #[test]
    fn test_failed_goal_ignores_progress() {
        let mut user = UserStats {
            streak: 6,
            ..UserStats::default()
        };
        let mut goal = goal(3, 1);

        assert!(goal.fail(&mut user, now()));
        assert_eq!(goal.status, GoalStatus::Fail);
        assert_eq!(user.streak, 0);
        assert!(!goal.fail(&mut user, now()));

        let result = goal.increase_progress(&mut user, 5, now());
        assert!(!result.completed_now);
        assert_eq!(goal.progress, 1);
    }

    #[test]
    fn test_completed_goal_cannot_fail() {
        let mut user = UserStats::default();
        let mut goal = goal(1, 0);
        goal.increase_progress(&mut user, 1, now());

        assert!(!goal.fail(&mut user, now()));
        assert_eq!(user.streak, 1);
    }

    #[test]
    fn test_roll_over_after_completed_yesterday() {
        let mut user = UserStats {
            streak: 3,
            ..UserStats::default()
        };
        let mut previous = goal(1, 0);
        previous.status = GoalStatus::Completed;
        let tomorrow = previous.date.succ_opt().unwrap();

        assert_eq!(roll_over(&mut previous, &mut user, tomorrow, now()), RollOver::Kept);
        assert_eq!(user.streak, 3);
    }

    #[test]
    fn test_roll_over_fails_pending_goal() {
        let mut user = UserStats {
            streak: 3,
            ..UserStats::default()
        };
        let mut previous = goal(4, 2);
        let tomorrow = previous.date.succ_opt().unwrap();

        assert_eq!(roll_over(&mut previous, &mut user, tomorrow, now()), RollOver::Failed);
        assert_eq!(previous.status, GoalStatus::Fail);
        assert_eq!(user.streak, 0);
    }

    #[test]
    fn test_roll_over_breaks_streak_after_skipped_day() {
        let mut user = UserStats {
            streak: 3,
            ..UserStats::default()
        };
        let mut previous = goal(1, 0);
        previous.status = GoalStatus::Completed;
        let later = previous.date + chrono::Days::new(2);

        assert_eq!(
            roll_over(&mut previous, &mut user, later, now()),
            RollOver::StreakBroken
        );
        assert_eq!(previous.status, GoalStatus::Completed);
        assert_eq!(user.streak, 0);
    }

    #[test]
    fn test_roll_over_same_day_is_noop() {
        let mut user = UserStats {
            streak: 2,
            ..UserStats::default()
        };
        let mut previous = goal(4, 2);
        let today = previous.date;

        assert_eq!(roll_over(&mut previous, &mut user, today, now()), RollOver::Kept);
        assert_eq!(previous.status, GoalStatus::Pending);
        assert_eq!(user.streak, 2);
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in [GoalStatus::Pending, GoalStatus::Completed, GoalStatus::Fail] {
            assert_eq!(status.as_str().parse::<GoalStatus>().unwrap(), status);
        }
        assert!("DONE".parse::<GoalStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&GoalStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
    }
}
