//! Text normalization, sentence segmentation, and the prose quality filter.
//!
//! Segmentation is a punctuation heuristic rather than a grammar: a boundary is
//! a `.`, `!` or `?` followed by whitespace and then an ASCII uppercase letter,
//! a digit, or a quote. Lowercase continuations ("e.g. the") never split.
//! The strategy sits behind [`SentenceSegmenter`] so a smarter splitter can be
//! swapped in without touching scoring or rendering.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

/// Minimum sentence length in characters (exclusive).
pub const MIN_SENTENCE_CHARS: usize = 40;

/// Minimum number of space-separated words in a kept sentence.
pub const MIN_SENTENCE_WORDS: usize = 8;

/// Legal and boilerplate phrases that disqualify a sentence.
#[allow(clippy::expect_used)]
static BOILERPLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(if they fail|terms of service|privacy policy|copyright|all rights reserved|disclaimer)\b",
    )
    .expect("boilerplate regex is valid") // Static pattern, safe to panic
});

/// Navigation/call-to-action phrases that disqualify a sentence.
#[allow(clippy::expect_used)]
static NAVIGATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(click here|learn more|read more|sign up|log in|contact us)\b")
        .expect("navigation regex is valid") // Static pattern, safe to panic
});

/// Articles, pronouns and modals; at least one must appear for text to count as prose.
#[allow(clippy::expect_used)]
static FUNCTION_WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(the|a|an|this|these|those|it|they|we|you|he|she|will|can|should|would|could|may|might|must)\b",
    )
    .expect("function word regex is valid") // Static pattern, safe to panic
});

/// A sentence that survived segmentation and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Ordinal position among kept sentences, in source order.
    pub index: usize,
    /// Trimmed sentence text.
    pub text: String,
}

/// Strategy for splitting normalized text into sentence candidates.
pub trait SentenceSegmenter {
    /// Splits `text` into candidate sentences in source order.
    ///
    /// Candidates may be empty or untrimmed; filtering happens afterwards.
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Default boundary heuristic: terminal punctuation, whitespace, then an
/// uppercase letter, digit, or quote.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl SentenceSegmenter for PunctuationSegmenter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut candidates = Vec::new();
        let mut start = 0;

        for (index, ch) in text.char_indices() {
            if !matches!(ch, '.' | '!' | '?') {
                continue;
            }
            let boundary = index + ch.len_utf8();
            let rest = &text[boundary..];
            let gap: usize = rest
                .chars()
                .take_while(|c| c.is_whitespace())
                .map(char::len_utf8)
                .sum();
            if gap == 0 {
                continue;
            }
            let Some(next) = rest[gap..].chars().next() else {
                continue;
            };
            if starts_sentence(next) {
                candidates.push(&text[start..boundary]);
                start = boundary + gap;
            }
        }

        candidates.push(&text[start..]);
        candidates
    }
}

fn starts_sentence(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '"' || ch == '\''
}

/// Collapses every whitespace run to a single space and trims the ends.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns true when a candidate looks like a real sentence of prose.
///
/// All predicates must hold: more than 40 characters, at least 8 words,
/// no boilerplate or navigation phrase, and at least one function word.
#[must_use]
pub fn is_quality_sentence(candidate: &str) -> bool {
    candidate.chars().count() > MIN_SENTENCE_CHARS
        && candidate.split(' ').count() >= MIN_SENTENCE_WORDS
        && !BOILERPLATE_PATTERN.is_match(candidate)
        && !NAVIGATION_PATTERN.is_match(candidate)
        && FUNCTION_WORD_PATTERN.is_match(candidate)
}

/// Splits normalized text with `segmenter` and keeps only quality sentences.
///
/// Indices are assigned after filtering, so they are contiguous from zero.
#[instrument(skip_all, fields(chars = text.len()))]
pub fn segment(text: &str, segmenter: &dyn SentenceSegmenter) -> Vec<Sentence> {
    let candidates = segmenter.split(text);
    let total = candidates.len();

    let sentences: Vec<Sentence> = candidates
        .into_iter()
        .map(str::trim)
        .filter(|candidate| is_quality_sentence(candidate))
        .enumerate()
        .map(|(index, text)| Sentence {
            index,
            text: text.to_string(),
        })
        .collect();

    debug!(candidates = total, kept = sentences.len(), "segmented text");
    sentences
}
