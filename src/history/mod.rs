//! Saved summaries and user settings, persisted in SQLite.

mod search;
mod settings;
mod store;

pub use search::{
    RankedEntry, SEARCH_FUZZY_THRESHOLD, SearchMatchKind, classify_search_match,
    normalize_search_text, rank_entries,
};
pub use settings::{SettingsStore, Theme};
pub use store::{HISTORY_LIMIT, HistoryEntry, HistoryStore, NewHistoryEntry, PREVIEW_CHARS};

use thiserror::Error;

/// Errors from history and settings persistence.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Query or connection failure.
    #[error("history database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No entry with the requested id.
    #[error("no saved summary with id {0}")]
    NotFound(i64),

    /// A stored setting holds an unexpected value.
    #[error("invalid stored value for setting {key}: {value}")]
    InvalidSetting {
        /// Setting key.
        key: String,
        /// Raw stored value.
        value: String,
    },
}
