use chrono::{DateTime, NaiveDate, Utc};
use recallo_srs::{AnswerRatio, DailyGoal, GoalStatus, ReviewSchedule, SrsError, UserStats};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User row - owns cards, schedules, currency and goal state
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Cumulative score, only ever grows
    pub score: i64,
    pub correct_answers: i64,
    pub wrong_answers: i64,
    /// Derived from the two counters above, 0.5 before the first answer
    pub answers_ratio: f64,
    /// Spendable currency, never negative (CHECK constraint)
    pub gold: i64,
    /// Derived from owned items
    pub current_gold_multiplier: i64,
    /// Active daily goal, if one was ensured
    pub current_daily_goal_id: Option<Uuid>,
    /// Consecutive completed daily goals
    pub streak: i64,
    /// Reviews per day the user aims for (profile setting)
    pub daily_goal_target: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The aggregate the scheduling core operates on.
    pub fn stats(&self) -> UserStats {
        UserStats {
            score: self.score,
            answers: AnswerRatio::new(self.correct_answers, self.wrong_answers),
            gold: self.gold,
            gold_multiplier: self.current_gold_multiplier,
            streak: self.streak,
        }
    }

    /// Copy an updated aggregate back onto the row.
    pub fn apply_stats(&mut self, stats: &UserStats) {
        self.score = stats.score;
        self.correct_answers = stats.answers.correct;
        self.wrong_answers = stats.answers.wrong;
        self.answers_ratio = stats.answers_ratio();
        self.gold = stats.gold;
        self.current_gold_multiplier = stats.gold_multiplier;
        self.streak = stats.streak;
    }
}

/// Card row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub image_link: Option<String>,
    /// Free-text category (max 100 chars)
    pub category: Option<String>,
    /// Accepted alternate answers (TEXT[])
    pub expected_answers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub owned_by: Option<Uuid>,
    pub is_inverted: bool,
    pub has_inverted_child: bool,
    pub original_card_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
}

impl From<Card> for recallo_srs::Card {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            question: card.question,
            answer: card.answer,
            image_link: card.image_link,
            category: card.category,
            expected_answers: card.expected_answers,
            created_at: card.created_at,
            owned_by: card.owned_by,
            is_inverted: card.is_inverted,
            has_inverted_child: card.has_inverted_child,
            original_card_id: card.original_card_id,
            parent_id: card.parent_id,
        }
    }
}

impl From<recallo_srs::Card> for Card {
    fn from(card: recallo_srs::Card) -> Self {
        Self {
            id: card.id,
            question: card.question,
            answer: card.answer,
            image_link: card.image_link,
            category: card.category,
            expected_answers: card.expected_answers,
            created_at: card.created_at,
            owned_by: card.owned_by,
            is_inverted: card.is_inverted,
            has_inverted_child: card.has_inverted_child,
            original_card_id: card.original_card_id,
            parent_id: card.parent_id,
        }
    }
}

/// Per-(user, card) review state, unique on (user_id, card_id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserCardSchedule {
    pub user_id: Uuid,
    pub card_id: Uuid,
    /// Seconds until the next review, always >= 1
    pub interval_secs: i64,
    pub answer_streak: i64,
    pub last_reviewed: DateTime<Utc>,
    pub next_review: DateTime<Utc>,
}

impl From<UserCardSchedule> for ReviewSchedule {
    fn from(row: UserCardSchedule) -> Self {
        Self {
            user_id: row.user_id,
            card_id: row.card_id,
            interval: row.interval_secs,
            answer_streak: row.answer_streak,
            last_reviewed: row.last_reviewed,
            next_review: row.next_review,
        }
    }
}

impl From<ReviewSchedule> for UserCardSchedule {
    fn from(schedule: ReviewSchedule) -> Self {
        Self {
            user_id: schedule.user_id,
            card_id: schedule.card_id,
            interval_secs: schedule.interval,
            answer_streak: schedule.answer_streak,
            last_reviewed: schedule.last_reviewed,
            next_review: schedule.next_review,
        }
    }
}

/// Daily goal row; `status` is one of PENDING, COMPLETED, FAIL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DailyGoalRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_date: NaiveDate,
    pub target: i32,
    pub progress: i32,
    pub status: String,
    pub closed_at: Option<DateTime<Utc>>,
}

impl TryFrom<DailyGoalRow> for DailyGoal {
    type Error = SrsError;

    fn try_from(row: DailyGoalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            date: row.goal_date,
            target: row.target,
            progress: row.progress,
            status: row.status.parse::<GoalStatus>()?,
            closed_at: row.closed_at,
        })
    }
}

/// Pending goal of an earlier day, picked up by the expiry sweep
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ExpiredGoal {
    pub id: Uuid,
    pub user_id: Uuid,
}

/// Card due for review, joined with its schedule
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DueCard {
    pub card_id: Uuid,
    pub question: String,
    pub image_link: Option<String>,
    pub category: Option<String>,
    pub interval_secs: i64,
    pub answer_streak: i64,
    pub next_review: DateTime<Utc>,
}

/// Shop item that raises the owner's gold multiplier
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    /// Price of the first level; upgrades cost more
    pub price: i64,
    /// Added to the multiplier per owned level
    pub gold_multiplier_bonus: i64,
}

/// Owned item and its upgrade level
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserItem {
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub level: i32,
}
