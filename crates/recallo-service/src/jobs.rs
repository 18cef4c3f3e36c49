//! Background jobs for periodic maintenance tasks.
//!
//! Expired daily goals are also closed lazily when their user opens a new
//! day's goal; the sweep makes sure inactive users' goals are failed as well.

use std::time::Duration;

use chrono::{DateTime, Utc};
use recallo_db::repositories::{daily_goal as goal_repo, user as user_repo};
use recallo_srs::{DailyGoal, daily_goal};
use tokio::time::interval;

use crate::{ServiceState, error::ServiceError, metrics};

const SWEEP_BATCH_SIZE: i64 = 500;

/// Start all background jobs
///
/// Returns a vector of join handles that can be aborted on shutdown
pub fn start_background_jobs(
    state: ServiceState,
    goal_sweep_interval: Duration,
) -> Vec<tokio::task::JoinHandle<()>> {
    vec![tokio::spawn(periodic_goal_sweep_job(
        state,
        goal_sweep_interval,
    ))]
}

/// Fail pending goals of past days, every `period`
async fn periodic_goal_sweep_job(state: ServiceState, period: Duration) {
    let mut interval = interval(period);

    loop {
        interval.tick().await;

        match sweep_expired_goals(&state, Utc::now()).await {
            Ok(failed) if failed > 0 => {
                tracing::info!("Goal sweep complete: {} expired goals failed", failed);
            }
            Ok(_) => {
                tracing::debug!("Goal sweep complete: no expired goals found");
            }
            Err(e) => {
                tracing::error!("Failed to sweep expired daily goals: {}", e);
            }
        }
    }
}

/// Mark every PENDING goal of a day before `now`'s day as FAIL and reset its
/// owner's streak. Returns the number of goals failed.
///
/// Each goal is closed in its own transaction, locking the user before the
/// goal like every other goal writer.
pub async fn sweep_expired_goals(
    state: &ServiceState,
    now: DateTime<Utc>,
) -> Result<u64, ServiceError> {
    let today = daily_goal::goal_date(now);
    let mut failed = 0;

    loop {
        let expired = goal_repo::list_expired_pending(&state.pool, today, SWEEP_BATCH_SIZE).await?;
        let batch_len = expired.len();
        let mut failed_in_batch = 0;

        for goal in expired {
            let mut tx = state.pool.begin().await?;

            let Some(user) = user_repo::lock_by_id(&mut *tx, goal.user_id).await? else {
                continue;
            };
            let Some(row) = goal_repo::lock_by_id(&mut *tx, goal.id).await? else {
                continue;
            };
            let mut goal = DailyGoal::try_from(row)?;
            let mut stats = user.stats();

            if goal.fail(&mut stats, now) {
                goal_repo::save(&mut *tx, &goal).await?;
                user_repo::save_stats(&mut *tx, user.id, &stats).await?;
                failed_in_batch += 1;
            }

            tx.commit().await?;
        }

        failed += failed_in_batch;
        metrics::record_goals_failed(failed_in_batch);

        if (batch_len as i64) < SWEEP_BATCH_SIZE || failed_in_batch == 0 {
            break;
        }
    }

    Ok(failed)
}
