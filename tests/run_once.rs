// tests/run_once.rs
//
// Orchestration against stub providers and a recording notifier; no network.

use anyhow::{anyhow, Result};
use fear_greed_alert::{
    run_once, AlertThresholds, DisabledNotifier, Notifier, ScoreReading, ScoreResult, Source,
    SourceProvider,
};
use std::sync::Mutex;

struct Fixed {
    source: Source,
    result: ScoreResult,
}

#[async_trait::async_trait]
impl SourceProvider for Fixed {
    async fn fetch_score(&self) -> ScoreResult {
        self.result.clone()
    }

    fn source(&self) -> Source {
        self.source
    }
}

struct Recording {
    sent: Mutex<Vec<String>>,
    fail: bool,
    enabled: bool,
}

impl Default for Recording {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
            enabled: true,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for Recording {
    async fn send(&self, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(anyhow!("endpoint down"))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

fn cnn(result: ScoreResult) -> Box<dyn SourceProvider> {
    Box::new(Fixed {
        source: Source::Cnn,
        result,
    })
}

fn cmc(result: ScoreResult) -> Box<dyn SourceProvider> {
    Box::new(Fixed {
        source: Source::Cmc,
        result,
    })
}

fn reading(score: i64) -> ScoreReading {
    ScoreReading::new(score).expect("valid score")
}

#[tokio::test]
async fn extreme_greed_cnn_alerts_with_rating() {
    let providers = vec![
        cnn(ScoreResult::Success(
            reading(80)
                .with_rating(Some("Extreme Greed".into()))
                .with_timestamp(Some("2023-11-14T22:13:20Z".into())),
        )),
        cmc(ScoreResult::failure("No value found (CMC may render JS)")),
    ];
    let notifier = Recording::default();

    let report = run_once(&providers, &notifier, AlertThresholds::default()).await;

    let sent = notifier.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1, "only CNN should alert: {sent:?}");
    assert!(sent[0].contains("80"));
    assert!(sent[0].contains("Extreme Greed"));
    assert!(sent[0].contains("Cable News Network CNN"));
    assert_eq!(report.sent, sent);
    assert_eq!(report.failed_deliveries, 0);
    assert!(matches!(
        report.result_for(Source::Cmc),
        Some(ScoreResult::Failure { .. })
    ));
}

#[tokio::test]
async fn alert_iff_outside_quiet_band_for_both_sources() {
    for s in 0..=100i64 {
        let providers = vec![
            cnn(ScoreResult::Success(reading(s).with_rating(Some("x".into())))),
            cmc(ScoreResult::Success(reading(s).with_method("tree-data-test"))),
        ];
        let notifier = Recording::default();
        run_once(&providers, &notifier, AlertThresholds::default()).await;

        let expected = if s >= 75 || s <= 40 { 2 } else { 0 };
        assert_eq!(notifier.sent.lock().unwrap().len(), expected, "score {s}");
    }
}

#[tokio::test]
async fn failures_never_alert_even_with_numbers_in_reason() {
    let providers = vec![
        cnn(ScoreResult::failure("Fetch/JSON error: 10 / 100 retries, score 90")),
        cmc(ScoreResult::failure("Fetch error: HTTP 500")),
    ];
    let notifier = Recording::default();

    let report = run_once(&providers, &notifier, AlertThresholds::default()).await;

    assert!(notifier.sent.lock().unwrap().is_empty());
    assert!(report.sent.is_empty());
    assert_eq!(report.results.len(), 2);
}

#[tokio::test]
async fn delivery_failure_is_counted_and_does_not_stop_other_alerts() {
    let providers = vec![
        cnn(ScoreResult::Success(reading(12).with_rating(Some("Extreme Fear".into())))),
        cmc(ScoreResult::Success(reading(90).with_method("comment-aware-regex"))),
    ];
    let notifier = Recording {
        fail: true,
        ..Default::default()
    };

    let report = run_once(&providers, &notifier, AlertThresholds::default()).await;

    assert_eq!(notifier.sent.lock().unwrap().len(), 2, "both attempted once");
    assert_eq!(report.failed_deliveries, 2);
    assert!(report.sent.is_empty());
}

#[tokio::test]
async fn cmc_alert_has_no_rating_suffix() {
    let providers = vec![cmc(ScoreResult::Success(
        reading(22).with_method("comment-aware-regex"),
    ))];
    let notifier = Recording::default();

    run_once(&providers, &notifier, AlertThresholds::default()).await;

    let sent = notifier.sent.lock().unwrap().clone();
    assert_eq!(
        sent,
        vec!["⚠️ Coin Market Cap (CMC) Crypto Fear & Greed Alert! Score=22".to_string()]
    );
}

#[tokio::test]
async fn disabled_notifier_leaves_run_intact() {
    let providers = vec![cnn(ScoreResult::Success(reading(95)))];

    let report = run_once(&providers, &DisabledNotifier, AlertThresholds::default()).await;

    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed_deliveries, 0);
    assert!(report.result_for(Source::Cnn).unwrap().is_success());
}

#[tokio::test]
async fn disabled_notifier_is_never_called() {
    let providers = vec![
        cnn(ScoreResult::Success(reading(5))),
        cmc(ScoreResult::Success(reading(99).with_method("tree-class"))),
    ];
    let notifier = Recording {
        enabled: false,
        ..Default::default()
    };

    let report = run_once(&providers, &notifier, AlertThresholds::default()).await;

    assert!(notifier.sent.lock().unwrap().is_empty());
    assert_eq!(report.skipped, 2);
    assert_eq!(report.failed_deliveries, 0);
    assert!(report.sent.is_empty());
}
