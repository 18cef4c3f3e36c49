//! Tracing and logging configuration
//!
//! Pretty, human-readable logs in development and JSON structured logs in
//! production.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Default directives when `RUST_LOG` is unset, in development.
const DEVELOPMENT_FILTER: &str =
    "info,recallo_service=debug,recallo_db=debug,worker=debug,sqlx=warn";

/// Default directives when `RUST_LOG` is unset, in production.
const PRODUCTION_FILTER: &str = "warn,recallo_service=info,recallo_db=info,worker=info,sqlx=warn";

/// Initialize tracing/logging based on the environment
///
/// # Development Mode
/// - Pretty-printed logs with file locations and line numbers
/// - Default level: DEBUG for the recallo crates, INFO for dependencies
///
/// # Production Mode
/// - JSON-formatted structured logs, current span and span list included
/// - Default level: INFO for the service and worker, WARN for dependencies
///
/// # Environment Variables
/// - `RUST_LOG`: Override default log level (e.g., `RUST_LOG=recallo_service=trace`)
pub fn init_tracing(env: &Environment) {
    if env.is_development() {
        init_development_tracing();
    } else {
        init_production_tracing();
    }
}

fn init_development_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEVELOPMENT_FILTER));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in development mode");
}

fn init_production_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(PRODUCTION_FILTER));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in production mode");
}
