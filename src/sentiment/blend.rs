//! Polarity blending, labelling and confidence

use super::types::{Confidence, Label};

/// Polarity above this is positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below this is negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Blend weights applied to (crypto, generic, emoji) scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub crypto: f64,
    pub generic: f64,
    pub emoji: f64,
}

/// Used when at least one lexicon term matched
pub const WITH_TERMS: BlendWeights = BlendWeights {
    crypto: 0.6,
    generic: 0.3,
    emoji: 0.1,
};

/// Used when no lexicon term matched
pub const WITHOUT_TERMS: BlendWeights = BlendWeights {
    crypto: 0.0,
    generic: 0.8,
    emoji: 0.2,
};

impl BlendWeights {
    pub fn for_match_count(match_count: usize) -> Self {
        if match_count > 0 {
            WITH_TERMS
        } else {
            WITHOUT_TERMS
        }
    }
}

/// Final polarity with its classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    /// Unrounded blended polarity
    pub polarity: f64,
    pub label: Label,
    pub confidence: Confidence,
}

/// Combine the three signals into one polarity, label and confidence tier
pub fn blend(
    crypto_score: f64,
    match_count: usize,
    generic_polarity: f64,
    emoji_score: f64,
) -> Blend {
    let w = BlendWeights::for_match_count(match_count);
    let polarity = crypto_score * w.crypto + generic_polarity * w.generic + emoji_score * w.emoji;

    Blend {
        polarity,
        label: label_for(polarity),
        confidence: confidence_for(match_count, generic_polarity, emoji_score),
    }
}

pub fn label_for(polarity: f64) -> Label {
    if polarity > POSITIVE_THRESHOLD {
        Label::Positive
    } else if polarity < NEGATIVE_THRESHOLD {
        Label::Negative
    } else {
        Label::Neutral
    }
}

/// Point-based reliability heuristic
pub fn confidence_for(match_count: usize, generic_polarity: f64, emoji_score: f64) -> Confidence {
    let mut points = match match_count {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => 3,
    };

    let generic = generic_polarity.abs();
    if generic > 0.5 {
        points += 2;
    } else if generic > 0.2 {
        points += 1;
    }

    if emoji_score.abs() > 0.3 {
        points += 1;
    }

    match points {
        p if p >= 4 => Confidence::High,
        p if p >= 2 => Confidence::Medium,
        _ => Confidence::Low,
    }
}

/// Round to 4 decimal places, half away from zero
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
