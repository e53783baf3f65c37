// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod alert;
pub mod config;
pub mod engine;
pub mod ingest;
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::alert::{AlertLevel, AlertThresholds};
pub use crate::config::AppConfig;
pub use crate::engine::{run_once, RunReport};
pub use crate::ingest::{ScoreReading, ScoreResult, Source, SourceProvider};
pub use crate::notify::{DisabledNotifier, Notifier, TelegramNotifier};

use anyhow::Result;

use crate::ingest::providers::{CmcProvider, CnnProvider};

/// Both feeds, CNN first, pointed at the URLs in `cfg`.
pub fn default_providers(cfg: &AppConfig) -> Result<Vec<Box<dyn SourceProvider>>> {
    let providers: Vec<Box<dyn SourceProvider>> = vec![
        Box::new(CnnProvider::new(cfg.cnn_url.clone())?),
        Box::new(CmcProvider::new(cfg.cmc_url.clone())?),
    ];
    Ok(providers)
}

/// Telegram when credentials are present, otherwise a notifier that refuses every send.
pub fn build_notifier(cfg: &AppConfig) -> Box<dyn Notifier> {
    match &cfg.telegram {
        Some(tg) => Box::new(TelegramNotifier::new(tg)),
        None => Box::new(DisabledNotifier),
    }
}
