//! Sentiment scoring engine
//!
//! Scores short crypto texts by blending a domain lexicon, emoji signal
//! and a generic polarity engine. Pure computation: no I/O, no shared
//! mutable state beyond the immutable lexicon.

mod analyzer;
mod blend;
mod lexicon;
mod matcher;
mod normalize;
mod polarity;
mod summary;
mod types;

pub use analyzer::SentimentAnalyzer;
pub use blend::{
    blend, confidence_for, label_for, round4, Blend, BlendWeights, NEGATIVE_THRESHOLD,
    POSITIVE_THRESHOLD,
};
pub use lexicon::{Lexicon, LexiconBuilder, LexiconEntry};
pub use matcher::{TermMatch, TermMatcher, TermMatches};
pub use normalize::{emoji_score, extract_price_mentions, normalize, Normalized};
pub use polarity::{guarded_score, PolarityEngine, VaderEngine};
pub use summary::BatchSummary;
pub use types::{
    Confidence, Label, Method, PolarityScore, ScoredText, SentimentError, SentimentRecord,
};
