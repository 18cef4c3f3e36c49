use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Service configuration, read from environment variables.
///
/// | variable | default |
/// |---|---|
/// | `DATABASE_URL` | required |
/// | `ENV` | `development` |
/// | `DB_MAX_CONNECTIONS` | 10 |
/// | `INITIAL_INTERVAL_SECS` | 60 |
/// | `DEFAULT_DAILY_GOAL_TARGET` | 10 |
/// | `GOAL_SWEEP_INTERVAL_SECS` | 3600 |
/// | `METRICS_ADDR` | `0.0.0.0:9000` |
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    pub database_url: String,
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Interval given to newly attached cards, in seconds
    #[serde(default = "default_initial_interval_secs")]
    pub initial_interval_secs: i64,
    /// Daily goal target for users who have not set one
    #[serde(default = "default_daily_goal_target")]
    pub default_daily_goal_target: i32,
    #[serde(default = "default_goal_sweep_interval_secs")]
    pub goal_sweep_interval_secs: u64,
    #[serde(default = "default_metrics_addr")]
    pub metrics_addr: String,
}

const fn default_db_max_connections() -> u32 {
    10
}

const fn default_initial_interval_secs() -> i64 {
    recallo_srs::schedule::DEFAULT_SEED_INTERVAL
}

const fn default_daily_goal_target() -> i32 {
    10
}

const fn default_goal_sweep_interval_secs() -> u64 {
    3600
}

fn default_metrics_addr() -> String {
    "0.0.0.0:9000".to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        envy::from_env::<Self>()?.validated()
    }

    /// Build from explicit `(VARIABLE, value)` pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars)?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("DATABASE_URL cannot be empty".to_string()));
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        if self.initial_interval_secs < 1 {
            return Err(ConfigError::Invalid(
                "INITIAL_INTERVAL_SECS must be at least 1".to_string(),
            ));
        }
        if self.default_daily_goal_target < 1 {
            return Err(ConfigError::Invalid(
                "DEFAULT_DAILY_GOAL_TARGET must be at least 1".to_string(),
            ));
        }
        if self.goal_sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "GOAL_SWEEP_INTERVAL_SECS must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}
