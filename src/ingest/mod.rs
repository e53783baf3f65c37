// src/ingest/mod.rs
pub mod http;
pub mod providers;
pub mod types;

use metrics::{describe_counter, describe_gauge};
use once_cell::sync::OnceCell;

pub use types::{ScoreReading, ScoreResult, Source, SourceProvider};

/// One-time metrics registration (so series carry descriptions once a recorder is installed).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("fng_fetch_total", "Fear & greed fetch attempts per provider.");
        describe_counter!(
            "fng_fetch_failures_total",
            "Fetches that ended in a Failure result."
        );
        describe_counter!("fng_alerts_sent_total", "Alerts delivered to the notifier.");
        describe_counter!(
            "fng_alert_failures_total",
            "Alerts the notifier failed to deliver."
        );
        describe_gauge!("fng_last_run_ts", "Unix ts when the last run finished.");
    });
}
