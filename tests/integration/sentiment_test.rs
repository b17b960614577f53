//! Integration tests for the sentiment engine

use crypto_sentinel::sentiment::{
    label_for, Confidence, Label, Lexicon, Method, PolarityEngine, PolarityScore,
    SentimentAnalyzer, SentimentError, SentimentRecord, VaderEngine, NEGATIVE_THRESHOLD,
    POSITIVE_THRESHOLD,
};
use std::sync::Arc;

/// Deterministic engine returning a fixed polarity
struct StubEngine(f64);

impl PolarityEngine for StubEngine {
    fn score(&self, _text: &str) -> Result<PolarityScore, SentimentError> {
        Ok(PolarityScore {
            polarity: self.0,
            subjectivity: 0.4,
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Engine that panics on every call
struct PanickingEngine;

impl PolarityEngine for PanickingEngine {
    fn score(&self, _text: &str) -> Result<PolarityScore, SentimentError> {
        panic!("engine bug")
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

fn stub(polarity: f64) -> SentimentAnalyzer {
    SentimentAnalyzer::with_engine(Arc::new(StubEngine(polarity)))
}

#[test]
fn test_text_without_terms_is_generic() {
    let record = stub(0.0).score("Nothing special happened today");
    assert_eq!(record.method, Method::GenericStandard);
    assert_eq!(record.crypto_score, 0.0);
    assert_eq!(record.match_count, 0);
    assert!(record.crypto_terms.is_empty());
}

#[test]
fn test_longest_match_wins() {
    let record = stub(0.0).score("Another GREEN CANDLE on the daily");
    assert_eq!(record.crypto_terms, vec!["green candle"]);
    assert_eq!(record.crypto_score, 0.6);
}

#[test]
fn test_golden_scenarios() {
    let record = stub(0.3).score("Bitcoin to the moon! Diamond hands HODL");
    assert_eq!(record.crypto_terms, vec!["diamond hands", "moon", "hodl"]);
    assert_eq!(record.crypto_score, 2.2);
    assert_eq!(record.label, Label::Positive);
    assert_eq!(record.confidence, Confidence::High);

    let record = stub(-0.6).score("rug pull scam, total rekt, liquidated");
    assert_eq!(record.label, Label::Negative);
    assert_eq!(record.confidence, Confidence::High);

    let record = stub(0.15).score("a calm afternoon");
    assert_eq!(record.polarity, 0.12);
    assert_eq!(record.label, Label::Positive);
    assert_eq!(record.confidence, Confidence::Low);
}

#[test]
fn test_golden_scenarios_with_vader() {
    let analyzer = SentimentAnalyzer::new();

    let record = analyzer.score("Bitcoin to the moon! Diamond hands HODL");
    assert_eq!(record.crypto_terms, vec!["diamond hands", "moon", "hodl"]);
    assert_eq!(record.crypto_score, 2.2);
    assert_eq!(record.generic_polarity, 0.4003);
    assert_eq!(record.subjectivity, 0.3097);
    assert_eq!(record.polarity, 1.4401);
    assert_eq!(record.method, Method::EnhancedCrypto);
    assert_eq!(record.label, Label::Positive);
    assert_eq!(record.confidence, Confidence::High);

    let record = analyzer.score("rug pull scam, total rekt, liquidated");
    assert_eq!(record.crypto_terms, vec!["liquidated", "rug pull", "rekt", "scam"]);
    assert_eq!(record.crypto_score, -3.6);
    assert_eq!(record.generic_polarity, -0.5719);
    assert_eq!(record.polarity, -2.3316);
    assert_eq!(record.label, Label::Negative);
    assert_eq!(record.confidence, Confidence::High);
}

#[test]
fn test_label_uses_unrounded_polarity() {
    // 0.3 * 0.3334 = 0.10002: stored as 0.1, still above the positive threshold
    let record = stub(0.3334).score("wallet");
    assert_eq!(record.crypto_terms, vec!["wallet"]);
    assert_eq!(record.polarity, 0.1);
    assert_eq!(record.label, Label::Positive);
    assert_eq!(label_for(record.polarity), Label::Neutral);
}

#[test]
fn test_label_follows_thresholds() {
    let analyzer = stub(0.0);
    let texts = [
        "moon", "rekt", "dip", "hold", "red", "green", "fud", "wallet", "plain",
    ];
    for text in texts {
        let record = analyzer.score(text);
        let expected = if record.polarity > POSITIVE_THRESHOLD {
            Label::Positive
        } else if record.polarity < NEGATIVE_THRESHOLD {
            Label::Negative
        } else {
            Label::Neutral
        };
        assert_eq!(record.label, expected, "label mismatch for {:?}", text);
        assert_eq!(label_for(record.polarity), expected);
    }
}

#[test]
fn test_urls_and_mentions_are_ignored() {
    let record = stub(0.0).score("@moonbot check https://moon.example.com/rekt");
    assert_eq!(record.match_count, 0);
    assert_eq!(record.method, Method::GenericStandard);
}

#[test]
fn test_panicking_engine_falls_back() {
    let analyzer = SentimentAnalyzer::with_engine(Arc::new(PanickingEngine));
    assert_eq!(analyzer.score("to the moon"), SentimentRecord::fallback());

    let batch = analyzer.score_batch(&["moon", "rekt"]);
    assert_eq!(batch.len(), 2);
    assert!(batch.iter().all(|s| s.record.is_fallback()));
}

#[test]
fn test_custom_lexicon() {
    let lexicon = Arc::new(
        Lexicon::builder()
            .entry("wagmi", 0.8)
            .entry("ngmi", -0.8)
            .entry("WAGMI", 0.5)
            .build(),
    );
    assert_eq!(lexicon.len(), 2);
    assert_eq!(lexicon.lookup("wagmi"), Some(0.5));

    let analyzer = SentimentAnalyzer::with_parts(lexicon, Arc::new(StubEngine(0.0)));
    let record = analyzer.score("WAGMI frens");
    assert_eq!(record.crypto_terms, vec!["wagmi"]);
    assert_eq!(record.polarity, 0.3);
    // "moon" is not in this lexicon
    assert_eq!(analyzer.score("moon").method, Method::GenericStandard);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let texts: Vec<String> = (0..200)
        .map(|i| match i % 4 {
            0 => format!("bullish breakout #{}", i),
            1 => format!("whale dump 📉 #{}", i),
            2 => String::new(),
            _ => format!("calm market #{}", i),
        })
        .collect();

    let analyzer = stub(0.05);
    let sequential = analyzer.score_batch(&texts);
    let parallel = analyzer.score_batch_parallel(&texts);

    assert_eq!(sequential, parallel);
    for (i, scored) in parallel.iter().enumerate() {
        assert_eq!(scored.text_index, i);
    }
    assert!(parallel[2].record.is_fallback());
}

#[test]
fn test_vader_engine() {
    let engine = VaderEngine::new();
    let positive = engine.score("This is a great and wonderful day").unwrap();
    assert!(positive.polarity > 0.0);
    assert!((0.0..=1.0).contains(&positive.subjectivity));

    let negative = engine.score("This is a terrible, awful disaster").unwrap();
    assert!(negative.polarity < 0.0);

    let analyzer = SentimentAnalyzer::new();
    assert_eq!(analyzer.engine_name(), engine.name());
    let record = analyzer.score("Great news, bitcoin is mooning 🚀");
    assert_eq!(record.label, Label::Positive);
    assert_eq!(record.method, Method::EnhancedCrypto);
}

#[test]
fn test_record_serializes_snake_case() {
    let record = stub(0.0).score("moon");
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["method"], "enhanced_crypto");
    assert_eq!(json["label"], "positive");
    assert_eq!(json["crypto_terms"][0], "moon");
}
