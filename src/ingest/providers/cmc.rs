// src/ingest/providers/cmc.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use crate::ingest::http::{build_client, get_text};
use crate::ingest::types::{ScoreReading, ScoreResult, Source, SourceProvider};

pub const DEFAULT_CMC_URL: &str = "https://coinmarketcap.com/charts/fear-and-greed-index/";
pub const CMC_TIMEOUT: Duration = Duration::from_secs(12);

pub const METHOD_DATA_TEST: &str = "tree-data-test";
pub const METHOD_CLASS: &str = "tree-class";
pub const METHOD_COMMENT_REGEX: &str = "comment-aware-regex";

pub const NOT_FOUND_REASON: &str = "No value found (CMC may render JS)";

const SELECTOR_DATA_TEST: &str = r#"span[data-test="fear-greed-index-num"]"#;
const SELECTOR_BASE_TEXT: &str = r#"span[class*="base-text"]"#;

static RE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([0-9]{1,3})\b").unwrap());

// N, then any number of `<!-- ... -->` (each with trailing ws) around the slash, then 100.
static RE_OUT_OF_100: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\b([0-9]{1,3})\b\s*(?:<!--.*?-->\s*)*/\s*(?:<!--.*?-->\s*)*100").unwrap()
});

pub struct CmcProvider {
    url: String,
    client: Client,
}

impl CmcProvider {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: build_client(CMC_TIMEOUT).context("cmc client")?,
        })
    }
}

#[async_trait]
impl SourceProvider for CmcProvider {
    async fn fetch_score(&self) -> ScoreResult {
        counter!("fng_fetch_total", "provider" => "CMC").increment(1);
        let result = match get_text(&self.client, &self.url).await {
            Ok(body) => parse_page(&body),
            Err(e) => {
                tracing::warn!(error = ?e, provider = "CMC", "provider http error");
                ScoreResult::failure(format!("Fetch error: {e:#}"))
            }
        };
        if !result.is_success() {
            counter!("fng_fetch_failures_total", "provider" => "CMC").increment(1);
        }
        result
    }

    fn source(&self) -> Source {
        Source::Cmc
    }
}

pub fn parse_page(html: &str) -> ScoreResult {
    match extract_score(html).and_then(|(v, m)| ScoreReading::new(v.into()).map(|r| (r, m))) {
        Some((reading, method)) => {
            tracing::debug!(provider = "CMC", method, score = reading.score(), "extracted");
            ScoreResult::Success(reading.with_method(method))
        }
        None => ScoreResult::failure(NOT_FOUND_REASON),
    }
}

/// Try each strategy in priority order; first hit wins.
pub fn extract_score(html: &str) -> Option<(u8, &'static str)> {
    if let Some(hit) = extract_from_tree(html) {
        return Some(hit);
    }
    extract_comment_tolerant(html).map(|v| (v, METHOD_COMMENT_REGEX))
}

/// DOM strategies. The parsed document is dropped before returning.
pub fn extract_from_tree(html: &str) -> Option<(u8, &'static str)> {
    let document = Html::parse_document(html);

    if let Ok(sel) = Selector::parse(SELECTOR_DATA_TEST) {
        if let Some(v) = document
            .select(&sel)
            .next()
            .and_then(|el| score_in_text(&element_text(&el)))
        {
            return Some((v, METHOD_DATA_TEST));
        }
    }

    let sel = Selector::parse(SELECTOR_BASE_TEXT).ok()?;
    document
        .select(&sel)
        .find_map(|el| score_in_text(&element_text(&el)))
        .map(|v| (v, METHOD_CLASS))
}

/// Lexical scan over raw markup, for pages that interleave comments
/// between the number, the slash and `100`. Only the first match counts;
/// an out-of-range first match means not found.
pub fn extract_comment_tolerant(html: &str) -> Option<u8> {
    RE_OUT_OF_100
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| in_range(m.as_str()))
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// First 1-3 digit run in `text`, if it is a valid score.
fn score_in_text(text: &str) -> Option<u8> {
    RE_DIGITS
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| in_range(m.as_str()))
}

fn in_range(digits: &str) -> Option<u8> {
    digits.parse::<u8>().ok().filter(|v| *v <= 100)
}
