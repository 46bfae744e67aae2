//! Term-frequency table and top-keyword selection.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;

/// Maximum number of keywords returned by [`KeywordTable::top_keywords`].
pub const MAX_KEYWORDS: usize = 15;

/// Tokens at or below this length never enter the table.
const MIN_TOKEN_LEN_EXCLUSIVE: usize = 2;

/// Fixed English stopword set excluded from the frequency table.
pub const STOPWORDS: &[&str] = &[
    "the", "is", "in", "at", "of", "a", "an", "and", "or", "to", "for", "on", "with", "as", "by",
    "from", "that", "this", "it", "be", "are", "was", "were", "has", "have", "had", "but", "not",
    "we", "they", "you", "i", "their", "its", "also",
];

#[allow(clippy::expect_used)]
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9']+").expect("token regex is valid") // Static pattern, safe to panic
});

/// Lowercases `text` and returns its alphanumeric/apostrophe runs.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn is_countable(token: &str) -> bool {
    token.len() > MIN_TOKEN_LEN_EXCLUSIVE && !STOPWORDS.contains(&token)
}

/// Occurrence counts for every countable token of a text.
///
/// A token is either absent or present with a count of at least one.
/// First-appearance order is remembered so frequency ties stay stable.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl KeywordTable {
    /// Builds the table from normalized text.
    #[must_use]
    #[instrument(skip_all, fields(chars = text.len()))]
    pub fn build(text: &str) -> Self {
        let mut table = Self::default();
        for token in tokenize(text) {
            if !is_countable(&token) {
                continue;
            }
            match table.counts.get_mut(&token) {
                Some(count) => *count += 1,
                None => {
                    table.counts.insert(token.clone(), 1);
                    table.order.push(token);
                }
            }
        }
        table
    }

    /// Returns the count for `token`, or zero when it is not in the table.
    #[must_use]
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true when no token was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tokens in table iteration order: index-like numbers ascending, then
    /// everything else in first-appearance order.
    fn iteration_order(&self) -> Vec<&String> {
        let mut indexed: Vec<(u32, &String)> = self
            .order
            .iter()
            .filter_map(|token| array_index(token).map(|index| (index, token)))
            .collect();
        indexed.sort_unstable_by_key(|(index, _)| *index);
        indexed
            .into_iter()
            .map(|(_, token)| token)
            .chain(self.order.iter().filter(|token| array_index(token).is_none()))
            .collect()
    }

    /// Returns up to [`MAX_KEYWORDS`] tokens, most frequent first.
    ///
    /// Ties follow table iteration order: canonical integer tokens below
    /// `u32::MAX` ascending, then the rest in first-appearance order.
    #[must_use]
    pub fn top_keywords(&self) -> Vec<String> {
        let mut ranked: Vec<(&String, usize)> = self
            .iteration_order()
            .into_iter()
            .map(|token| (token, self.count(token)))
            .collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1));
        ranked
            .into_iter()
            .take(MAX_KEYWORDS)
            .map(|(token, _)| token.clone())
            .collect()
    }
}

/// Parses `token` as a canonical array index: digits only, no leading zero
/// (except "0" itself), and below `u32::MAX`.
fn array_index(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse::<u32>().ok().filter(|index| *index < u32::MAX)
}
