//! Text normalization and emoji signal extraction

use once_cell::sync::Lazy;
use regex::Regex;

/// Score contributed by each emoji occurrence
const EMOJI_WEIGHT: f64 = 0.3;

const POSITIVE_EMOJIS: [&str; 10] = ["🚀", "🌙", "💎", "🔥", "📈", "💚", "✅", "🎉", "💪", "🔝"];

const NEGATIVE_EMOJIS: [&str; 10] = [
    "📉", "💔", "😭", "😰", "🔴", "❌", "💸", "\u{2B07}\u{FE0F}", "😱", "🩸",
];

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:[a-zA-Z0-9$-_@.&+!*(),]|%[0-9a-fA-F]{2})+").expect("valid URL regex")
});

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static PRICE_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"\$[\d,]+\.?\d*").expect("valid price regex"),
        Regex::new(r"(?i)USD?\s*[\d,]+\.?\d*").expect("valid price regex"),
        Regex::new(r"(?i)[\d,]+\.?\d*\s*dollars?").expect("valid price regex"),
    ]
});

/// Cleaned text plus the emoji polarity delta of the raw input
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub cleaned: String,
    pub emoji_score: f64,
}

/// Lower-case, strip URLs and mentions, collapse whitespace.
///
/// The emoji score is computed on the raw text, before any stripping.
pub fn normalize(raw: &str) -> Normalized {
    if raw.is_empty() {
        return Normalized::default();
    }

    let emoji_score = emoji_score(raw);

    let lowered = raw.to_lowercase();
    let without_urls = URL_RE.replace_all(&lowered, "");
    let without_mentions = MENTION_RE.replace_all(&without_urls, "");
    let cleaned = WHITESPACE_RE
        .replace_all(&without_mentions, " ")
        .trim()
        .to_string();

    Normalized {
        cleaned,
        emoji_score,
    }
}

/// +0.3 per positive emoji occurrence, -0.3 per negative one
pub fn emoji_score(raw: &str) -> f64 {
    let positive: usize = POSITIVE_EMOJIS.iter().map(|e| raw.matches(e).count()).sum();
    let negative: usize = NEGATIVE_EMOJIS.iter().map(|e| raw.matches(e).count()).sum();
    (positive as f64 - negative as f64) * EMOJI_WEIGHT
}

/// Extract dollar amounts such as `$1,234.56`, `USD 500` or `20 dollars`
pub fn extract_price_mentions(text: &str) -> Vec<f64> {
    let mut prices = Vec::new();

    for re in PRICE_RES.iter() {
        for m in re.find_iter(text) {
            let digits: String = m
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            match digits.parse::<f64>() {
                Ok(price) if price > 0.0 => prices.push(price),
                _ => continue,
            }
        }
    }

    prices
}
