//! Transactional operations over the Recallo scheduling core.
//!
//! Each public operation here is one database transaction: it locks the rows it
//! mutates, applies the pure rules from [`recallo_srs`] and persists the result,
//! so a failure at any step leaves nothing half-written.

pub mod answer;
pub mod cards;
pub mod config;
pub mod daily_goal;
pub mod error;
pub mod inversion;
pub mod jobs;
pub mod metrics;
pub mod shop;
pub mod state;
pub mod tracing;
pub mod users;
pub mod validation;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use state::ServiceState;
