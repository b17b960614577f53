//! Sentiment record types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Three-way sentiment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
            Label::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic reliability tier of a single scoring result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a record was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// At least one lexicon term matched; crypto score dominates the blend
    EnhancedCrypto,
    /// No lexicon term matched; generic polarity dominates the blend
    GenericStandard,
    /// Empty input or an internal failure
    ErrorFallback,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::EnhancedCrypto => "enhanced_crypto",
            Method::GenericStandard => "generic_standard",
            Method::ErrorFallback => "error_fallback",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the generic polarity engine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScore {
    /// Signed polarity, roughly in [-1, 1]
    pub polarity: f64,
    /// 0 = fact-like, 1 = opinion-like
    pub subjectivity: f64,
}

/// Scoring result for a single text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Final blended polarity
    pub polarity: f64,
    /// Passthrough from the generic engine
    pub subjectivity: f64,
    /// Classified from the unrounded blend, so a stored `polarity` of exactly
    /// 0.1 or -0.1 may carry a non-neutral label
    pub label: Label,
    pub confidence: Confidence,
    /// Unblended generic polarity, kept for diagnostics
    pub generic_polarity: f64,
    /// Sum of matched lexicon weights before blending
    pub crypto_score: f64,
    pub emoji_score: f64,
    /// Matched lexicon terms in match order
    pub crypto_terms: Vec<String>,
    pub match_count: usize,
    pub method: Method,
}

impl SentimentRecord {
    /// The all-zero record used for empty input and internal failures
    pub fn fallback() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            label: Label::Neutral,
            confidence: Confidence::Low,
            generic_polarity: 0.0,
            crypto_score: 0.0,
            emoji_score: 0.0,
            crypto_terms: Vec::new(),
            match_count: 0,
            method: Method::ErrorFallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.method == Method::ErrorFallback
    }

    /// Matched terms joined for tabular output
    pub fn terms_joined(&self) -> String {
        self.crypto_terms.join(", ")
    }
}

/// A record tagged with its position in the input batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredText {
    pub text_index: usize,
    /// Input text, truncated for display
    pub original_text: String,
    #[serde(flatten)]
    pub record: SentimentRecord,
}

/// Internal scoring failures. Never escapes the batch boundary.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// The generic polarity engine failed or panicked
    #[error("Polarity engine failure: {0}")]
    Engine(String),
    /// The engine returned NaN or infinity
    #[error("Non-finite {field} from polarity engine: {value}")]
    NonFinite { field: &'static str, value: f64 },
}
