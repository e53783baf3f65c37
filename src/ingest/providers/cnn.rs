// src/ingest/providers/cnn.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::ingest::http::{build_client, get_text};
use crate::ingest::types::{ScoreReading, ScoreResult, Source, SourceProvider};

pub const DEFAULT_CNN_URL: &str = "https://production.dataviz.cnn.io/index/fearandgreed/graphdata";
pub const CNN_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream has renamed this key before; tried in order, first present wins.
pub const SENTIMENT_KEYS: [&str; 3] = ["fear_and_greed", "fear-and-greed", "fearAndGreed"];

/// Anything above this is a millisecond epoch, anything else seconds.
/// 1e12 ms is September 2001; 1e12 s is ~31 700 years out.
const MILLIS_THRESHOLD: f64 = 1e12;

const ISO_Z_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub struct CnnProvider {
    url: String,
    client: Client,
}

impl CnnProvider {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: build_client(CNN_TIMEOUT).context("cnn client")?,
        })
    }
}

#[async_trait]
impl SourceProvider for CnnProvider {
    async fn fetch_score(&self) -> ScoreResult {
        counter!("fng_fetch_total", "provider" => "CNN").increment(1);
        let result = match get_text(&self.client, &self.url).await {
            Ok(body) => parse_payload(&body),
            Err(e) => {
                tracing::warn!(error = ?e, provider = "CNN", "provider http error");
                ScoreResult::failure(format!("Fetch/JSON error: {e:#}"))
            }
        };
        if !result.is_success() {
            counter!("fng_fetch_failures_total", "provider" => "CNN").increment(1);
        }
        result
    }

    fn source(&self) -> Source {
        Source::Cnn
    }
}

/// Turn a graphdata body into a result. Pure; no I/O.
pub fn parse_payload(body: &str) -> ScoreResult {
    let data: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return ScoreResult::failure(format!("Fetch/JSON error: {e}")),
    };

    let Some(fng) = find_sentiment(&data) else {
        return ScoreResult::failure("Could not find 'fear_and_greed' in CNN JSON.");
    };

    let Some(reading) = fng
        .get("score")
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite())
        .and_then(|s| ScoreReading::new(round_score(s)))
    else {
        return ScoreResult::failure("CNN score missing or out of range");
    };

    let rating = ["rating", "state"]
        .iter()
        .filter_map(|k| fng.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string);

    let timestamp = fng.get("timestamp").and_then(normalize_timestamp);

    ScoreResult::Success(reading.with_rating(rating).with_timestamp(timestamp))
}

/// Nearest integer; an exact `.5` tie goes toward 50 so a reading like
/// 74.5 or 40.5 never lands on an alert threshold by rounding alone.
fn round_score(s: f64) -> i64 {
    if (s - s.trunc()).abs() == 0.5 {
        if s > 50.0 {
            s.floor() as i64
        } else {
            s.ceil() as i64
        }
    } else {
        s.round() as i64
    }
}

fn find_sentiment(data: &Value) -> Option<&Map<String, Value>> {
    SENTIMENT_KEYS
        .iter()
        .filter_map(|k| data.get(*k).and_then(Value::as_object))
        .find(|obj| !obj.is_empty())
}

/// Normalize the feed's timestamp to `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Numbers carry no unit, so the magnitude decides: `> 1e12` is milliseconds,
/// otherwise seconds. Strings are taken as RFC 3339. Anything unparseable is
/// `None`; a bad timestamp never fails the reading.
pub fn normalize_timestamp(raw: &Value) -> Option<String> {
    let dt = match raw {
        Value::Number(n) => from_epoch(n.as_f64()?)?,
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()?
            .with_timezone(&Utc),
        _ => return None,
    };
    Some(dt.format(ISO_Z_FORMAT).to_string())
}

fn from_epoch(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let millis = if ts > MILLIS_THRESHOLD { ts } else { ts * 1000.0 };
    DateTime::from_timestamp_millis(millis as i64)
}
