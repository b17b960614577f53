//! Generic polarity engines
//!
//! The analyzer treats general-purpose polarity scoring as an injected
//! capability. [`VaderEngine`] is the default implementation.

use super::types::{PolarityScore, SentimentError};
use std::panic::{self, AssertUnwindSafe};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Scores arbitrary text for polarity and subjectivity
pub trait PolarityEngine: Send + Sync {
    /// Score a cleaned, lower-cased text
    fn score(&self, text: &str) -> Result<PolarityScore, SentimentError>;

    /// Engine name for logs
    fn name(&self) -> &'static str;
}

/// VADER-backed polarity engine.
///
/// Polarity is VADER's compound score. Subjectivity is the share of
/// opinionated (positive or negative) tokens, i.e. `pos + neg`.
pub struct VaderEngine {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderEngine {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityEngine for VaderEngine {
    fn score(&self, text: &str) -> Result<PolarityScore, SentimentError> {
        if text.trim().is_empty() {
            return Ok(PolarityScore::default());
        }

        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        Ok(PolarityScore {
            polarity: get("compound"),
            subjectivity: (get("pos") + get("neg")).clamp(0.0, 1.0),
        })
    }

    fn name(&self) -> &'static str {
        "vader"
    }
}

/// Score through `engine`, turning panics and non-finite output into errors
pub fn guarded_score(
    engine: &dyn PolarityEngine,
    text: &str,
) -> Result<PolarityScore, SentimentError> {
    let score = panic::catch_unwind(AssertUnwindSafe(|| engine.score(text)))
        .map_err(|payload| SentimentError::Engine(panic_message(payload.as_ref())))??;
    check_finite(score)
}

/// Reject NaN and infinite engine output
pub fn check_finite(score: PolarityScore) -> Result<PolarityScore, SentimentError> {
    if !score.polarity.is_finite() {
        return Err(SentimentError::NonFinite {
            field: "polarity",
            value: score.polarity,
        });
    }
    if !score.subjectivity.is_finite() {
        return Err(SentimentError::NonFinite {
            field: "subjectivity",
            value: score.subjectivity,
        });
    }
    Ok(score)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "engine panicked".to_string()
    }
}
