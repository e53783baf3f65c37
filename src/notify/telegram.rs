// src/notify/telegram.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::Notifier;
use crate::config::TelegramConfig;

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Clone)]
pub struct TelegramNotifier {
    api_base: String,
    token: String,
    chat_id: String,
    client: Client,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(cfg: &TelegramConfig) -> Self {
        Self {
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            token: cfg.token.clone(),
            chat_id: cfg.chat_id.clone(),
            client: Client::new(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // token stays out of logs
        f.debug_struct("TelegramNotifier")
            .field("api_base", &self.api_base)
            .field("chat_id", &self.chat_id)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // reqwest errors embed the URL, which carries the token.
        self.client
            .post(self.send_message_url())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("telegram post")?
            .error_for_status()
            .map_err(|e| e.without_url())
            .context("telegram non-2xx")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
