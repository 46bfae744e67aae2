//! Sentence scoring by keyword frequency, position, and lexical cues.

use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

use super::keywords::{KeywordTable, tokenize};
use super::segmenter::Sentence;

const FIRST_SENTENCE_BOOST: f64 = 1.5;
const CLOSING_SENTENCE_BOOST: f64 = 0.3;
/// Sentences with `index > len - CLOSING_WINDOW` receive the closing boost.
const CLOSING_WINDOW: usize = 5;

const CONNECTIVE_BOOST: f64 = 0.5;
const ACADEMIC_BOOST: f64 = 0.3;
const QUESTION_PENALTY: f64 = 0.2;

#[allow(clippy::expect_used)]
static CONNECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(however|therefore|consequently|moreover|furthermore|additionally|specifically|particularly)\b",
    )
    .expect("connective regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static ACADEMIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(examples?|instance|case|study|research|analysis|method|approach|theory|concept)\b",
    )
    .expect("academic regex is valid") // Static pattern, safe to panic
});

/// A sentence with its relevance score for the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSentence {
    /// Position among kept sentences, in source order.
    pub index: usize,
    /// Sentence text.
    pub text: String,
    /// Relative score; only comparable within one request.
    pub score: f64,
}

/// Scores every sentence; output has the same length and order as the input.
#[must_use]
#[instrument(skip_all, fields(sentences = sentences.len(), terms = table.len()))]
pub fn score_sentences(sentences: &[Sentence], table: &KeywordTable) -> Vec<ScoredSentence> {
    let total = sentences.len();
    sentences
        .iter()
        .map(|sentence| ScoredSentence {
            index: sentence.index,
            text: sentence.text.clone(),
            score: base_score(&sentence.text, table)
                * position_multiplier(sentence.index, total)
                * quality_multiplier(&sentence.text),
        })
        .collect()
}

/// Sum of table counts for every token in the sentence.
#[allow(clippy::cast_precision_loss)]
fn base_score(text: &str, table: &KeywordTable) -> f64 {
    tokenize(text)
        .iter()
        .map(|token| table.count(token))
        .sum::<usize>() as f64
}

/// Lead sentence boost plus an additive boost for the closing sentences.
pub(crate) fn position_multiplier(index: usize, total: usize) -> f64 {
    let lead = if index == 0 { FIRST_SENTENCE_BOOST } else { 1.0 };
    let closing = if index + CLOSING_WINDOW > total {
        CLOSING_SENTENCE_BOOST
    } else {
        0.0
    };
    lead + closing
}

/// Cue-word adjustments starting from 1.0.
pub(crate) fn quality_multiplier(text: &str) -> f64 {
    let mut multiplier = 1.0;
    if CONNECTIVE_PATTERN.is_match(text) {
        multiplier += CONNECTIVE_BOOST;
    }
    if ACADEMIC_PATTERN.is_match(text) {
        multiplier += ACADEMIC_BOOST;
    }
    if text.contains('?') {
        multiplier -= QUESTION_PENALTY;
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(index: usize, text: &str) -> Sentence {
        Sentence {
            index,
            text: text.to_string(),
        }
    }

    fn approx_eq(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn test_position_multiplier_first_sentence_of_long_text() {
        assert!(approx_eq(position_multiplier(0, 20), 1.5));
    }

    #[test]
    fn test_position_multiplier_middle_sentence() {
        assert!(approx_eq(position_multiplier(10, 20), 1.0));
    }

    #[test]
    fn test_position_multiplier_closing_window() {
        // With 20 sentences, indices 16..=19 satisfy index > 20 - 5.
        assert!(approx_eq(position_multiplier(15, 20), 1.0));
        assert!(approx_eq(position_multiplier(16, 20), 1.3));
        assert!(approx_eq(position_multiplier(19, 20), 1.3));
    }

    #[test]
    fn test_position_multiplier_short_text_is_cumulative() {
        // Fewer than five sentences: every sentence is in the closing window.
        assert!(approx_eq(position_multiplier(0, 3), 1.8));
        assert!(approx_eq(position_multiplier(2, 3), 1.3));
    }

    #[test]
    fn test_quality_multiplier_cues() {
        assert!(approx_eq(quality_multiplier("Plain words only here."), 1.0));
        assert!(approx_eq(quality_multiplier("However, it grows."), 1.5));
        assert!(approx_eq(quality_multiplier("This case study shows it."), 1.3));
        assert!(approx_eq(quality_multiplier("Why does it grow?"), 0.8));
        assert!(approx_eq(
            quality_multiplier("Therefore, is this research valid?"),
            1.6
        ));
    }

    #[test]
    fn test_quality_multiplier_requires_whole_words() {
        // "cases" and "studying" are not whole-word matches.
        assert!(approx_eq(quality_multiplier("In cases of studying plants."), 1.0));
    }

    #[test]
    fn test_score_sentences_preserves_order_and_cardinality() {
        let table = KeywordTable::build("light light light water water glucose");
        let sentences = vec![
            sentence(0, "glucose"),
            sentence(1, "light water"),
            sentence(2, "nothing relevant"),
        ];
        let scored = score_sentences(&sentences, &table);

        assert_eq!(scored.len(), 3);
        assert_eq!(
            scored.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        // glucose=1, lead 1.5 + closing 0.3
        assert!(approx_eq(scored[0].score, 1.8));
        // light(3) + water(2) = 5, closing 1.3
        assert!(approx_eq(scored[1].score, 6.5));
        assert!(approx_eq(scored[2].score, 0.0));
    }

    #[test]
    fn test_score_ignores_stopwords_in_sentence() {
        let table = KeywordTable::build("the the the energy");
        let scored = score_sentences(&[sentence(0, "the the energy")], &table);
        assert!(approx_eq(scored[0].score, 1.0 * 1.8));
    }
}
