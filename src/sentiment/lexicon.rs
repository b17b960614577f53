//! Crypto term lexicon
//!
//! An immutable term → weight table assembled from five weight bands.
//! Terms are matched longest first, so the table keeps a length-sorted
//! view alongside the lookup map.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Strongly bullish terms
const POSITIVE_STRONG: &[(&str, f64)] = &[
    ("moon", 0.9),
    ("mooning", 0.9),
    ("lambo", 0.9),
    ("rocket", 0.8),
    ("ath", 0.8),
    ("all-time high", 0.8),
    ("diamond hands", 0.7),
    ("hodl", 0.6),
    ("hold", 0.4),
    ("pump", 0.6),
    ("surge", 0.7),
    ("rally", 0.7),
    ("bull run", 0.8),
    ("bullish", 0.7),
    ("breakout", 0.7),
    ("green candle", 0.6),
    ("green", 0.3),
    ("profit", 0.6),
    ("gains", 0.7),
    ("buy the dip", 0.5),
    ("accumulate", 0.4),
    ("strong hands", 0.6),
];

/// Moderately bullish terms
const POSITIVE_MODERATE: &[(&str, f64)] = &[
    ("adoption", 0.4),
    ("institutional", 0.3),
    ("mainstream", 0.4),
    ("partnership", 0.5),
    ("integration", 0.4),
    ("upgrade", 0.5),
    ("bullish signal", 0.6),
    ("golden cross", 0.6),
    ("support level", 0.3),
    ("resistance break", 0.5),
    ("volume spike", 0.4),
    ("whale accumulation", 0.5),
];

/// Strongly bearish terms
const NEGATIVE_STRONG: &[(&str, f64)] = &[
    ("rekt", -0.9),
    ("liquidation", -0.9),
    ("liquidated", -0.9),
    ("rug pull", -0.9),
    ("rugpull", -0.9),
    ("scam", -0.9),
    ("ponzi", -0.9),
    ("crash", -0.8),
    ("dump", -0.7),
    ("dumping", -0.7),
    ("bear market", -0.7),
    ("bearish", -0.7),
    ("panic sell", -0.8),
    ("panic selling", -0.8),
    ("death cross", -0.7),
    ("red candle", -0.6),
    ("red", -0.3),
    ("loss", -0.6),
    ("losses", -0.6),
    ("bleeding", -0.7),
    ("brutal", -0.8),
];

/// Moderately bearish terms
const NEGATIVE_MODERATE: &[(&str, f64)] = &[
    ("correction", -0.3),
    ("dip", -0.2),
    ("pullback", -0.2),
    ("decline", -0.4),
    ("sell", -0.3),
    ("selling pressure", -0.5),
    ("resistance", -0.2),
    ("overhead resistance", -0.3),
    ("weak hands", -0.4),
    ("fud", -0.6),
    ("fear", -0.5),
    ("uncertainty", -0.3),
    ("doubt", -0.4),
    ("volatile", -0.2),
    ("manipulation", -0.6),
    ("whale dump", -0.7),
    ("paper hands", -0.5),
];

/// Informational terms. They count as matches but carry no weight.
const NEUTRAL: &[(&str, f64)] = &[
    ("blockchain", 0.0),
    ("mining", 0.0),
    ("hash", 0.0),
    ("wallet", 0.0),
    ("exchange", 0.0),
    ("transaction", 0.0),
    ("block", 0.0),
    ("node", 0.0),
    ("protocol", 0.0),
    ("fork", 0.0),
    ("halving", 0.0),
    ("difficulty", 0.0),
    ("market cap", 0.0),
    ("volume", 0.0),
    ("liquidity", 0.0),
    ("trading", 0.0),
    ("analysis", 0.0),
    ("chart", 0.0),
    ("technical", 0.0),
    ("fundamental", 0.0),
];

static CRYPTO_LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(
        LexiconBuilder::new()
            .band(POSITIVE_STRONG)
            .band(POSITIVE_MODERATE)
            .band(NEGATIVE_STRONG)
            .band(NEGATIVE_MODERATE)
            .band(NEUTRAL)
            .build(),
    )
});

/// A single lexicon term and its signed weight
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconEntry {
    pub term: String,
    pub weight: f64,
}

/// Immutable term → weight table
#[derive(Debug, Clone)]
pub struct Lexicon {
    weights: HashMap<String, f64>,
    by_length: Vec<LexiconEntry>,
}

impl Lexicon {
    /// The shared crypto lexicon, built on first use
    pub fn crypto() -> Arc<Lexicon> {
        CRYPTO_LEXICON.clone()
    }

    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::new()
    }

    /// Weight of an exact term, if present
    pub fn lookup(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    /// All entries, longest term first. Equal lengths keep insertion order.
    pub fn terms_by_length_desc(&self) -> &[LexiconEntry] {
        &self.by_length
    }

    pub fn len(&self) -> usize {
        self.by_length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_length.is_empty()
    }
}

/// Assembles a [`Lexicon`] from weight bands
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    entries: Vec<LexiconEntry>,
    index: HashMap<String, usize>,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every entry of a band
    pub fn band(mut self, band: &[(&str, f64)]) -> Self {
        for (term, weight) in band {
            self = self.entry(term, *weight);
        }
        self
    }

    /// Add one entry. A repeated term overwrites the earlier weight in place.
    pub fn entry(mut self, term: &str, weight: f64) -> Self {
        let term = term.to_lowercase();
        match self.index.get(&term) {
            Some(&pos) => {
                tracing::debug!(
                    term = %term,
                    old = self.entries[pos].weight,
                    new = weight,
                    "Lexicon term overridden"
                );
                self.entries[pos].weight = weight;
            }
            None => {
                self.index.insert(term.clone(), self.entries.len());
                self.entries.push(LexiconEntry { term, weight });
            }
        }
        self
    }

    pub fn build(self) -> Lexicon {
        let weights = self
            .entries
            .iter()
            .map(|e| (e.term.clone(), e.weight))
            .collect();

        let mut by_length = self.entries;
        // stable: ties keep insertion order
        by_length.sort_by(|a, b| b.term.chars().count().cmp(&a.term.chars().count()));

        Lexicon { weights, by_length }
    }
}
