// src/ingest/http.rs
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const BROWSER_REFERER: &str = "https://www.google.com/";

/// Headers both feeds expect from a "real" browser; they refuse bare clients.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE),
    );
    headers.insert(REFERER, HeaderValue::from_static(BROWSER_REFERER));
    headers
}

/// Client with browser headers and a total request timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .default_headers(browser_headers())
        .timeout(timeout)
        .build()
        .context("building http client")
}

/// Single GET, non-2xx is an error. No retry.
pub async fn get_text(client: &Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url} non-2xx"))?;
    resp.text()
        .await
        .with_context(|| format!("reading body of {url}"))
}
