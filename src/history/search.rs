//! Search ranking over saved summaries.
//!
//! Ranks entries by exact, substring, and fuzzy match quality.

use std::cmp::Ordering;

use super::HistoryEntry;
use crate::format::strip_tags;

/// Fuzzy match threshold (0.0–1.0); matches at or above this are included.
pub const SEARCH_FUZZY_THRESHOLD: f64 = 0.86;

/// How a query matched an entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchMatchKind {
    Fuzzy,
    Substring,
    Exact,
}

/// An entry with match metadata for ranking and display.
#[derive(Debug, Clone)]
pub struct RankedEntry {
    pub entry: HistoryEntry,
    pub match_kind: SearchMatchKind,
    pub similarity: f64,
    pub matched_field: &'static str,
}

/// Ranks entries by their best match across title and summary.
#[must_use]
pub fn rank_entries(query: &str, entries: Vec<HistoryEntry>) -> Vec<RankedEntry> {
    let query_norm = normalize_search_text(query);
    if query_norm.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<RankedEntry> = entries
        .into_iter()
        .filter_map(|entry| {
            let summary_text = strip_tags(&entry.summary);
            let mut best: Option<(SearchMatchKind, f64, &'static str)> = None;
            for (field_name, field_value) in [
                ("title", entry.title.as_str()),
                ("summary", summary_text.as_str()),
            ] {
                let Some((kind, similarity)) = classify_search_match(&query_norm, field_value)
                else {
                    continue;
                };
                let is_better = best.as_ref().is_none_or(|(best_kind, best_similarity, _)| {
                    (kind, similarity) > (*best_kind, *best_similarity)
                });
                if is_better {
                    best = Some((kind, similarity, field_name));
                }
            }
            best.map(|(match_kind, similarity, matched_field)| RankedEntry {
                entry,
                match_kind,
                similarity,
                matched_field,
            })
        })
        .collect();

    ranked.sort_by(compare_ranked);
    ranked
}

/// Best match first; newer entries win ties.
fn compare_ranked(left: &RankedEntry, right: &RankedEntry) -> Ordering {
    right
        .match_kind
        .cmp(&left.match_kind)
        .then_with(|| right.similarity.total_cmp(&left.similarity))
        .then_with(|| right.entry.id.cmp(&left.entry.id))
}

/// Classifies how the normalized query matches `value`, if at all.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn classify_search_match(query_norm: &str, value: &str) -> Option<(SearchMatchKind, f64)> {
    let normalized = normalize_search_text(value);
    if normalized.is_empty() {
        return None;
    }

    if normalized == query_norm {
        return Some((SearchMatchKind::Exact, 1.0));
    }

    if normalized.contains(query_norm) {
        let similarity = (query_norm.chars().count() as f64
            / normalized.chars().count() as f64)
            .clamp(0.0, 1.0);
        return Some((SearchMatchKind::Substring, similarity));
    }

    let similarity = fuzzy_similarity(query_norm, &normalized);
    (similarity >= SEARCH_FUZZY_THRESHOLD).then_some((SearchMatchKind::Fuzzy, similarity))
}

/// Best similarity between the query and the whole value or any word in it.
fn fuzzy_similarity(query_norm: &str, normalized_value: &str) -> f64 {
    normalized_value
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| token.chars().count() >= 3)
        .map(|token| strsim::normalized_levenshtein(query_norm, token))
        .fold(
            strsim::normalized_levenshtein(query_norm, normalized_value),
            f64::max,
        )
}

/// Collapses whitespace and lowercases.
#[must_use]
pub fn normalize_search_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
