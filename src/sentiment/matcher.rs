//! Longest-match-first lexicon term matching

use super::lexicon::Lexicon;
use std::ops::Range;
use std::sync::Arc;

/// A lexicon term found in the text
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    pub term: String,
    pub weight: f64,
}

/// Result of scanning one text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TermMatches {
    /// Sum of matched weights, one per distinct term
    pub score: f64,
    /// Matches in scan order
    pub matches: Vec<TermMatch>,
}

impl TermMatches {
    pub fn count(&self) -> usize {
        self.matches.len()
    }

    pub fn terms(&self) -> Vec<String> {
        self.matches.iter().map(|m| m.term.clone()).collect()
    }
}

/// Scans text for lexicon terms, longest first.
///
/// Each byte of the text can be claimed by at most one term. Once a term
/// matches, all of its free occurrences are consumed so that shorter terms
/// nested inside it ("green" inside "green candle") cannot match the same span.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    lexicon: Arc<Lexicon>,
}

impl TermMatcher {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Scan already-normalized (lower-cased) text
    pub fn find(&self, cleaned: &str) -> TermMatches {
        let mut consumed = vec![false; cleaned.len()];
        let mut result = TermMatches::default();

        for entry in self.lexicon.terms_by_length_desc() {
            if entry.term.is_empty() {
                continue;
            }

            let spans = free_occurrences(cleaned, &entry.term, &consumed);
            if spans.is_empty() {
                continue;
            }

            for span in spans {
                consumed[span].iter_mut().for_each(|c| *c = true);
            }
            result.score += entry.weight;
            result.matches.push(TermMatch {
                term: entry.term.clone(),
                weight: entry.weight,
            });
        }

        result
    }
}

/// Byte ranges of `term` in `text` that touch no consumed byte
fn free_occurrences(text: &str, term: &str, consumed: &[bool]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();

        if consumed[begin..end].iter().any(|&c| c) {
            // retry from the next char boundary
            start = begin + text[begin..].chars().next().map_or(1, char::len_utf8);
            continue;
        }

        spans.push(begin..end);
        start = end;
    }

    spans
}
