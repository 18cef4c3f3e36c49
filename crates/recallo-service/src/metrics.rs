//! Prometheus metrics for review activity and the gold economy.

use std::net::SocketAddr;

use anyhow::Context;
use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid metrics address: {addr}"))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("failed to install Prometheus exporter")?;

    Ok(())
}

pub fn record_answer(is_correct: bool) {
    let result = if is_correct { "correct" } else { "wrong" };
    counter!("answers_total", "result" => result).increment(1);
}

/// `source` is `answer` or `daily_goal`.
pub fn record_gold_earned(source: &'static str, amount: i64) {
    if amount > 0 {
        counter!("gold_earned_total", "source" => source).increment(amount.unsigned_abs());
    }
}

pub fn record_goal_completed() {
    counter!("daily_goals_completed_total").increment(1);
}

pub fn record_goals_failed(count: u64) {
    if count > 0 {
        counter!("daily_goals_failed_total").increment(count);
    }
}

pub fn record_card_inverted() {
    counter!("cards_inverted_total").increment(1);
}

pub fn record_item_bought(level: i32) {
    let kind = if level > 1 { "upgrade" } else { "purchase" };
    counter!("items_bought_total", "kind" => kind).increment(1);
}
