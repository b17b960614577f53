//! Aggregate statistics over a scored batch

use super::types::{Label, Method, ScoredText};
use serde::{Deserialize, Serialize};

/// Batch-level sentiment statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub mean_polarity: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Records scored with the crypto lexicon
    pub enhanced: usize,
    pub fallbacks: usize,
    /// Sum of lexicon matches across the batch
    pub term_matches: usize,
}

impl BatchSummary {
    pub fn from_records(records: &[ScoredText]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };

        if records.is_empty() {
            return summary;
        }

        let mut polarity_sum = 0.0;
        for scored in records {
            let record = &scored.record;
            polarity_sum += record.polarity;
            match record.label {
                Label::Positive => summary.positive += 1,
                Label::Negative => summary.negative += 1,
                Label::Neutral => summary.neutral += 1,
            }
            match record.method {
                Method::EnhancedCrypto => summary.enhanced += 1,
                Method::ErrorFallback => summary.fallbacks += 1,
                Method::GenericStandard => {}
            }
            summary.term_matches += record.match_count;
        }
        summary.mean_polarity = polarity_sum / records.len() as f64;

        summary
    }

    /// Share of records using the crypto lexicon, in percent
    pub fn enhanced_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.enhanced as f64 / self.total as f64 * 100.0
    }

    pub fn positive_ratio(&self) -> f64 {
        ratio(self.positive, self.total)
    }

    pub fn negative_ratio(&self) -> f64 {
        ratio(self.negative, self.total)
    }

    pub fn log(&self) {
        tracing::info!(
            total = self.total,
            mean_polarity = %format!("{:.3}", self.mean_polarity),
            positive = self.positive,
            negative = self.negative,
            neutral = self.neutral,
            enhanced = self.enhanced,
            enhanced_pct = %format!("{:.1}", self.enhanced_pct()),
            fallbacks = self.fallbacks,
            term_matches = self.term_matches,
            "Sentiment batch scored"
        );
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
