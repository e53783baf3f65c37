// src/config/mod.rs
use crate::ingest::providers::{cmc::DEFAULT_CMC_URL, cnn::DEFAULT_CNN_URL};
use crate::notify::telegram::DEFAULT_TELEGRAM_API_BASE;

pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_CHAT_ID: &str = "CHAT_ID";
pub const ENV_TELEGRAM_API_BASE: &str = "TELEGRAM_API_BASE";
pub const ENV_CNN_URL: &str = "FNG_CNN_URL";
pub const ENV_CMC_URL: &str = "FNG_CMC_URL";

/// Messaging credentials. Only built when both token and chat id are present.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub token: String,
    pub chat_id: String,
    pub api_base: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Process configuration, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub cnn_url: String,
    pub cmc_url: String,
    /// `None` when `TELEGRAM_TOKEN` or `CHAT_ID` is missing; alerts are then skipped.
    pub telegram: Option<TelegramConfig>,
}

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| {
            lookup(k)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram = match (get(ENV_TELEGRAM_TOKEN), get(ENV_CHAT_ID)) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig {
                token,
                chat_id,
                api_base: get(ENV_TELEGRAM_API_BASE)
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_API_BASE.to_string()),
            }),
            _ => None,
        };

        Self {
            cnn_url: get(ENV_CNN_URL).unwrap_or_else(|| DEFAULT_CNN_URL.to_string()),
            cmc_url: get(ENV_CMC_URL).unwrap_or_else(|| DEFAULT_CMC_URL.to_string()),
            telegram,
        }
    }

    /// Names of required messaging variables that are unset.
    pub fn missing_telegram_vars<F>(lookup: F) -> Vec<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        [ENV_TELEGRAM_TOKEN, ENV_CHAT_ID]
            .into_iter()
            .filter(|k| lookup(*k).map_or(true, |v| v.trim().is_empty()))
            .collect()
    }
}
