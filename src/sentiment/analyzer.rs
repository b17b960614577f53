//! Sentiment analyzer: per-text scoring and batch orchestration

use super::blend::{blend, round4};
use super::lexicon::Lexicon;
use super::matcher::TermMatcher;
use super::normalize::normalize;
use super::polarity::{guarded_score, PolarityEngine, VaderEngine};
use super::summary::BatchSummary;
use super::types::{Method, ScoredText, SentimentError, SentimentRecord};
use rayon::prelude::*;
use std::sync::Arc;

/// Display length of `ScoredText::original_text`
const PREVIEW_CHARS: usize = 100;

/// Crypto-aware sentiment analyzer.
///
/// Blends lexicon term weights, emoji signal and a generic polarity engine.
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    matcher: TermMatcher,
    engine: Arc<dyn PolarityEngine>,
}

impl SentimentAnalyzer {
    /// Crypto lexicon with the VADER engine
    pub fn new() -> Self {
        Self::with_engine(Arc::new(VaderEngine::new()))
    }

    /// Crypto lexicon with a custom polarity engine
    pub fn with_engine(engine: Arc<dyn PolarityEngine>) -> Self {
        Self::with_parts(Lexicon::crypto(), engine)
    }

    pub fn with_parts(lexicon: Arc<Lexicon>, engine: Arc<dyn PolarityEngine>) -> Self {
        Self {
            matcher: TermMatcher::new(lexicon),
            engine,
        }
    }

    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    /// Score one text, surfacing internal failures
    pub fn try_score(&self, text: &str) -> Result<SentimentRecord, SentimentError> {
        if text.is_empty() {
            return Ok(SentimentRecord::fallback());
        }

        let normalized = normalize(text);
        let generic = guarded_score(self.engine.as_ref(), &normalized.cleaned)?;
        let terms = self.matcher.find(&normalized.cleaned);
        let match_count = terms.count();

        let blended = blend(
            terms.score,
            match_count,
            generic.polarity,
            normalized.emoji_score,
        );

        let method = if match_count > 0 {
            Method::EnhancedCrypto
        } else {
            Method::GenericStandard
        };

        Ok(SentimentRecord {
            polarity: round4(blended.polarity),
            subjectivity: round4(generic.subjectivity),
            label: blended.label,
            confidence: blended.confidence,
            generic_polarity: round4(generic.polarity),
            crypto_score: round4(terms.score),
            emoji_score: round4(normalized.emoji_score),
            crypto_terms: terms.terms(),
            match_count,
            method,
        })
    }

    /// Score one text. Failures yield the fallback record.
    pub fn score(&self, text: &str) -> SentimentRecord {
        self.try_score(text).unwrap_or_else(|e| {
            tracing::error!(error = %e, engine = self.engine.name(), "Sentiment scoring failed");
            SentimentRecord::fallback()
        })
    }

    /// Score text that may be missing
    pub fn score_optional(&self, text: Option<&str>) -> SentimentRecord {
        match text {
            Some(text) => self.score(text),
            None => SentimentRecord::fallback(),
        }
    }

    /// Score each text in order. One failing item never aborts the batch.
    pub fn score_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<ScoredText> {
        if texts.is_empty() {
            return Vec::new();
        }

        tracing::info!(count = texts.len(), "Scoring sentiment batch");

        let results: Vec<ScoredText> = texts
            .iter()
            .enumerate()
            .map(|(i, text)| self.score_item(i, text.as_ref()))
            .collect();

        BatchSummary::from_records(&results).log();
        results
    }

    /// Like [`score_batch`](Self::score_batch) but spread across the rayon pool.
    /// Output order matches input order.
    pub fn score_batch_parallel<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Vec<ScoredText> {
        if texts.is_empty() {
            return Vec::new();
        }

        tracing::info!(count = texts.len(), "Scoring sentiment batch in parallel");

        let results: Vec<ScoredText> = texts
            .par_iter()
            .enumerate()
            .map(|(i, text)| self.score_item(i, text.as_ref()))
            .collect();

        BatchSummary::from_records(&results).log();
        results
    }

    fn score_item(&self, index: usize, text: &str) -> ScoredText {
        ScoredText {
            text_index: index,
            original_text: preview(text),
            record: self.score(text),
        }
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
