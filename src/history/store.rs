//! Summary history: newest first, capped at [`HISTORY_LIMIT`] rows.

use sqlx::FromRow;
use tracing::{debug, instrument};

use super::HistoryError;
use super::search::{RankedEntry, rank_entries};
use crate::db::Database;
use crate::format::strip_tags;
use crate::study::StudyMaterial;
use crate::summarizer::{AcademicLevel, SummaryMode};

/// Maximum number of saved summaries; older ones are evicted on save.
pub const HISTORY_LIMIT: i64 = 20;

/// Characters shown in a history preview.
pub const PREVIEW_CHARS: usize = 80;

/// A saved summary row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct HistoryEntry {
    pub id: i64,
    /// UTC timestamp, RFC 3339.
    pub created_at: String,
    pub title: String,
    pub summary: String,
    /// Mode label as stored; see [`HistoryEntry::mode`].
    #[sqlx(rename = "mode")]
    pub mode_str: String,
    /// Level label as stored; see [`HistoryEntry::level`].
    #[sqlx(rename = "level")]
    pub level_str: String,
    /// Footer label of the engine that produced the summary.
    pub source: String,
}

impl HistoryEntry {
    /// Parsed summary mode.
    #[must_use]
    pub fn mode(&self) -> SummaryMode {
        SummaryMode::parse_lenient(&self.mode_str)
    }

    /// Parsed academic level.
    #[must_use]
    pub fn level(&self) -> AcademicLevel {
        AcademicLevel::parse_lenient(&self.level_str)
    }

    /// First [`PREVIEW_CHARS`] characters of the summary with tags removed, plus `...`.
    #[must_use]
    pub fn preview(&self) -> String {
        let plain = strip_tags(&self.summary);
        let head: String = plain.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }
}

/// Fields needed to save a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub title: String,
    pub summary: String,
    pub mode: SummaryMode,
    pub level: AcademicLevel,
    pub source: String,
}

impl From<&StudyMaterial> for NewHistoryEntry {
    fn from(material: &StudyMaterial) -> Self {
        Self {
            title: material.title.clone(),
            summary: material.summary.clone(),
            mode: material.mode,
            level: material.level,
            source: material.source_label(),
        }
    }
}

/// Repository over the `summary_history` table.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    db: Database,
}

impl HistoryStore {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Saves an entry and evicts everything beyond the newest [`HISTORY_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] on query failure.
    #[instrument(skip(self, entry), fields(title = %entry.title))]
    pub async fn save(&self, entry: &NewHistoryEntry) -> Result<i64, HistoryError> {
        let mut tx = self.db.pool().begin().await?;

        let id = sqlx::query(
            r"INSERT INTO summary_history (title, summary, mode, level, source)
              VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&entry.title)
        .bind(&entry.summary)
        .bind(entry.mode.as_str())
        .bind(entry.level.as_str())
        .bind(&entry.source)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let evicted = sqlx::query(
            r"DELETE FROM summary_history
              WHERE id NOT IN (SELECT id FROM summary_history ORDER BY id DESC LIMIT ?)",
        )
        .bind(HISTORY_LIMIT)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        debug!(id, evicted, "saved summary to history");
        Ok(id)
    }

    /// All entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] on query failure.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries =
            sqlx::query_as::<_, HistoryEntry>(r"SELECT * FROM summary_history ORDER BY id DESC")
                .fetch_all(self.db.pool())
                .await?;
        Ok(entries)
    }

    /// One entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::NotFound`] when the id does not exist.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<HistoryEntry, HistoryError> {
        sqlx::query_as::<_, HistoryEntry>(r"SELECT * FROM summary_history WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or(HistoryError::NotFound(id))
    }

    /// Deletes every entry, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] on query failure.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<u64, HistoryError> {
        let removed = sqlx::query(r"DELETE FROM summary_history")
            .execute(self.db.pool())
            .await?
            .rows_affected();
        debug!(removed, "cleared history");
        Ok(removed)
    }

    /// Entries whose title or summary matches `query`, best match first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] on query failure.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<RankedEntry>, HistoryError> {
        let entries = self.list().await?;
        Ok(rank_entries(query, entries))
    }
}
