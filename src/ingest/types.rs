// src/ingest/types.rs
use std::fmt;

/// Where a score came from. Drives the console prefix and the alert template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// CNN JSON feed.
    Cnn,
    /// CoinMarketCap HTML page.
    Cmc,
}

impl Source {
    /// Short console prefix, e.g. `CNN: 62 ...`.
    pub fn label(self) -> &'static str {
        match self {
            Source::Cnn => "CNN",
            Source::Cmc => "CMC",
        }
    }

    /// Name used inside the alert message.
    pub fn display_name(self) -> &'static str {
        match self {
            Source::Cnn => "Cable News Network CNN",
            Source::Cmc => "Coin Market Cap (CMC) Crypto",
        }
    }

    /// Only the JSON feed publishes a qualitative rating worth repeating.
    pub fn includes_rating_in_alert(self) -> bool {
        matches!(self, Source::Cnn)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A successfully extracted reading. `score` is always within 0..=100.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReading {
    score: u8,
    pub rating: Option<String>,
    /// ISO-8601 UTC with a literal `Z`, e.g. `2023-11-14T22:13:20Z`.
    pub timestamp: Option<String>,
    /// Which extraction strategy produced the value (diagnostic only).
    pub method: Option<String>,
}

impl ScoreReading {
    /// Returns `None` when `score` falls outside 0..=100.
    pub fn new(score: i64) -> Option<Self> {
        if !(0..=100).contains(&score) {
            return None;
        }
        Some(Self {
            score: score as u8,
            rating: None,
            timestamp: None,
            method: None,
        })
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn with_rating(mut self, rating: Option<String>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// Outcome of one adapter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreResult {
    Success(ScoreReading),
    Failure { reason: String },
}

impl ScoreResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        ScoreResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn reading(&self) -> Option<&ScoreReading> {
        match self {
            ScoreResult::Success(r) => Some(r),
            ScoreResult::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScoreResult::Success(_))
    }
}

/// One fear & greed feed. Implementations fold every transport or parse
/// error into `ScoreResult::Failure`, so the call itself cannot fail.
#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_score(&self) -> ScoreResult;
    fn source(&self) -> Source;
}
