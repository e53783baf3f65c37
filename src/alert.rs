//! # Alert rules
//! Pure threshold evaluation and message templates. No I/O.
//!
//! Both bounds are inclusive: a reading at or above `greed_at` is a greed
//! alert, at or below `fear_at` a fear alert, anything between is quiet.

use crate::ingest::types::{ScoreReading, Source};

pub const GREED_THRESHOLD: u8 = 75;
pub const FEAR_THRESHOLD: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Greed,
    Fear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertThresholds {
    pub greed_at: u8,
    pub fear_at: u8,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            greed_at: GREED_THRESHOLD,
            fear_at: FEAR_THRESHOLD,
        }
    }
}

impl AlertThresholds {
    pub fn level(&self, score: u8) -> Option<AlertLevel> {
        if score >= self.greed_at {
            Some(AlertLevel::Greed)
        } else if score <= self.fear_at {
            Some(AlertLevel::Fear)
        } else {
            None
        }
    }

    pub fn triggers(&self, score: u8) -> bool {
        self.level(score).is_some()
    }
}

/// `⚠️ <name> Fear & Greed Alert! Score=<n>`, plus ` (<rating>)` for the JSON feed.
pub fn compose_message(source: Source, reading: &ScoreReading) -> String {
    let mut msg = format!(
        "⚠️ {} Fear & Greed Alert! Score={}",
        source.display_name(),
        reading.score()
    );
    if source.includes_rating_in_alert() {
        if let Some(rating) = reading.rating.as_deref() {
            msg.push_str(&format!(" ({rating})"));
        }
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_iff_outside_quiet_band() {
        let t = AlertThresholds::default();
        for s in 0..=100u8 {
            let expected = s >= 75 || s <= 40;
            assert_eq!(t.triggers(s), expected, "score {s}");
        }
        for s in 41..=74u8 {
            assert_eq!(t.level(s), None);
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let t = AlertThresholds::default();
        assert_eq!(t.level(75), Some(AlertLevel::Greed));
        assert_eq!(t.level(40), Some(AlertLevel::Fear));
        assert_eq!(t.level(100), Some(AlertLevel::Greed));
        assert_eq!(t.level(0), Some(AlertLevel::Fear));
    }

    #[test]
    fn cnn_message_carries_rating() {
        let r = ScoreReading::new(80)
            .unwrap()
            .with_rating(Some("Extreme Greed".into()));
        assert_eq!(
            compose_message(Source::Cnn, &r),
            "⚠️ Cable News Network CNN Fear & Greed Alert! Score=80 (Extreme Greed)"
        );
    }

    #[test]
    fn cmc_message_has_no_rating_suffix() {
        let r = ScoreReading::new(22)
            .unwrap()
            .with_method("comment-aware-regex");
        assert_eq!(
            compose_message(Source::Cmc, &r),
            "⚠️ Coin Market Cap (CMC) Crypto Fear & Greed Alert! Score=22"
        );
    }

    #[test]
    fn cnn_without_rating_omits_parens() {
        let r = ScoreReading::new(10).unwrap();
        assert!(!compose_message(Source::Cnn, &r).contains('('));
    }
}
