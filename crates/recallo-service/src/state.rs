use sqlx::PgPool;

use crate::ServiceConfig;

/// Shared handle passed to every service operation.
#[derive(Clone)]
pub struct ServiceState {
    pub pool: PgPool,
    /// Interval given to newly attached cards, in seconds
    pub initial_interval_secs: i64,
    pub default_daily_goal_target: i32,
}

impl ServiceState {
    pub fn new(config: &ServiceConfig, pool: PgPool) -> Self {
        Self {
            pool,
            initial_interval_secs: config.initial_interval_secs,
            default_daily_goal_target: config.default_daily_goal_target,
        }
    }

    /// Connect to the configured database and bring its schema up to date.
    pub async fn connect(config: &ServiceConfig) -> anyhow::Result<Self> {
        let pool = recallo_db::create_pool(&config.database_url, config.db_max_connections).await?;
        recallo_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
        tracing::info!("Database connected and migrated");
        Ok(Self::new(config, pool))
    }
}
