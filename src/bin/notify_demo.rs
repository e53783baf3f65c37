//! Sends a single test message through the configured notifier, to check credentials.

use fear_greed_alert::{build_notifier, AppConfig};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = AppConfig::from_env();
    let notifier = build_notifier(&cfg);

    let text = format!(
        "Fear & Greed alert test message ({})",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    match notifier.send(&text).await {
        Ok(()) => println!("Notification sent: {text}"),
        Err(e) => {
            tracing::error!(error = ?e, notifier = notifier.name(), "test send failed");
            println!("notify-demo failed: {e:#}");
        }
    }
}
