//! Fear & Greed alert: binary entrypoint.
//! One run per invocation; scheduling is left to cron or a similar trigger.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fear_greed_alert::{
    build_notifier, config::AppConfig, default_providers, run_once, AlertThresholds,
};

/// Diagnostics go to stderr so stdout stays the human-readable summary.
/// `RUST_LOG` overrides the default `warn` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::from_env();
    if cfg.telegram.is_none() {
        let missing = AppConfig::missing_telegram_vars(|k| std::env::var(k).ok());
        tracing::warn!(?missing, "telegram not configured; alerts will be skipped");
    }

    let providers = default_providers(&cfg)?;
    let notifier = build_notifier(&cfg);

    let report = run_once(&providers, notifier.as_ref(), AlertThresholds::default()).await;
    tracing::info!(
        sources = report.results.len(),
        sent = report.sent.len(),
        failed = report.failed_deliveries,
        skipped = report.skipped,
        "run finished"
    );

    Ok(())
}
