//! # Run engine
//! One pass over all sources: fetch, print the summary, alert on extremes.
//! Providers run one after another; none depends on another's result.

use metrics::{counter, gauge};

use crate::alert::{compose_message, AlertThresholds};
use crate::ingest::{ensure_metrics_described, ScoreResult, Source, SourceProvider};
use crate::notify::Notifier;

/// What a single run observed and did.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub results: Vec<(Source, ScoreResult)>,
    /// Messages the notifier accepted.
    pub sent: Vec<String>,
    pub failed_deliveries: usize,
    /// Triggered alerts not attempted because the notifier is disabled.
    pub skipped: usize,
}

impl RunReport {
    pub fn result_for(&self, source: Source) -> Option<&ScoreResult> {
        self.results
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, r)| r)
    }
}

/// One console line per source, success or not.
pub fn summary_line(source: Source, result: &ScoreResult) -> String {
    match result {
        ScoreResult::Success(r) => match source {
            Source::Cnn => format!(
                "{}: {} ({}) at {}",
                source.label(),
                r.score(),
                r.rating.as_deref().unwrap_or("n/a"),
                r.timestamp.as_deref().unwrap_or("n/a")
            ),
            Source::Cmc => format!(
                "{}: {} (method: {})",
                source.label(),
                r.score(),
                r.method.as_deref().unwrap_or("n/a")
            ),
        },
        ScoreResult::Failure { reason } => format!("{} ERROR: {}", source.label(), reason),
    }
}

/// Fetch every provider, print summaries, then dispatch alerts.
/// Never fails: fetch errors are already `Failure`s, delivery errors are logged.
pub async fn run_once(
    providers: &[Box<dyn SourceProvider>],
    notifier: &dyn Notifier,
    thresholds: AlertThresholds,
) -> RunReport {
    ensure_metrics_described();
    let mut report = RunReport::default();

    for p in providers {
        let source = p.source();
        let result = p.fetch_score().await;
        println!("{}", summary_line(source, &result));
        report.results.push((source, result));
    }

    for (source, result) in &report.results {
        let Some(reading) = result.reading() else {
            continue;
        };
        let Some(level) = thresholds.level(reading.score()) else {
            tracing::debug!(provider = %source, score = reading.score(), "inside quiet band");
            continue;
        };

        let msg = compose_message(*source, reading);
        if !notifier.enabled() {
            tracing::warn!(provider = %source, ?level, "notifier disabled; alert skipped");
            report.skipped += 1;
            continue;
        }
        match notifier.send(&msg).await {
            Ok(()) => {
                println!("Notification sent: {msg}");
                tracing::info!(
                    provider = %source,
                    ?level,
                    notifier = notifier.name(),
                    "alert sent"
                );
                counter!("fng_alerts_sent_total").increment(1);
                report.sent.push(msg);
            }
            Err(e) => {
                tracing::error!(
                    error = ?e,
                    provider = %source,
                    notifier = notifier.name(),
                    "alert delivery failed"
                );
                counter!("fng_alert_failures_total").increment(1);
                report.failed_deliveries += 1;
            }
        }
    }

    gauge!("fng_last_run_ts").set(chrono::Utc::now().timestamp() as f64);
    report
}
