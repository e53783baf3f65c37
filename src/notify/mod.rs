// src/notify/mod.rs
pub mod telegram;

use anyhow::{anyhow, Result};

pub use telegram::TelegramNotifier;

/// Delivers one pre-formatted plain-text alert. One attempt, no queue.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
    fn name(&self) -> &'static str;

    /// `false` means alerts are skipped instead of attempted.
    fn enabled(&self) -> bool {
        true
    }
}

/// Stand-in when no messaging credentials are configured.
/// Reports itself disabled so the engine skips it; a direct send is refused.
#[derive(Debug, Clone, Default)]
pub struct DisabledNotifier;

#[async_trait::async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        tracing::warn!(text, "notifier disabled (TELEGRAM_TOKEN / CHAT_ID unset)");
        Err(anyhow!("notifier disabled: missing TELEGRAM_TOKEN or CHAT_ID"))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }

    fn enabled(&self) -> bool {
        false
    }
}
