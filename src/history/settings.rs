//! Key-value user settings.

use std::fmt;

use tracing::{debug, instrument};

use super::HistoryError;
use crate::db::Database;

const THEME_KEY: &str = "theme";

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("invalid theme: {other} (expected dark or light)")),
        }
    }
}

/// Repository over the `settings` table.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    db: Database,
}

impl SettingsStore {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Raw value for `key`, if set.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] on query failure.
    pub async fn get(&self, key: &str) -> Result<Option<String>, HistoryError> {
        let row: Option<(String,)> = sqlx::query_as(r"SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.map(|(value,)| value))
    }

    /// Upserts `key`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] on query failure.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), HistoryError> {
        sqlx::query(
            r"INSERT INTO settings (key, value, updated_at) VALUES (?, ?, datetime('now'))
              ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .execute(self.db.pool())
        .await?;
        debug!(key, value, "setting updated");
        Ok(())
    }

    /// Current theme; [`Theme::Dark`] when unset.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidSetting`] if the stored value is not a theme.
    #[instrument(skip(self))]
    pub async fn theme(&self) -> Result<Theme, HistoryError> {
        match self.get(THEME_KEY).await? {
            None => Ok(Theme::default()),
            Some(value) => value.parse().map_err(|_| HistoryError::InvalidSetting {
                key: THEME_KEY.to_string(),
                value,
            }),
        }
    }

    /// Stores `theme`.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Database`] on query failure.
    #[instrument(skip(self))]
    pub async fn set_theme(&self, theme: Theme) -> Result<(), HistoryError> {
        self.set(THEME_KEY, theme.as_str()).await
    }

    /// Switches dark and light, returning the new theme.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if reading or writing the setting fails.
    #[instrument(skip(self))]
    pub async fn toggle_theme(&self) -> Result<Theme, HistoryError> {
        let next = self.theme().await?.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn store() -> SettingsStore {
        SettingsStore::new(Database::new_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_theme_defaults_to_dark() {
        assert_eq!(store().await.theme().await.unwrap(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_toggle_theme_flips_and_persists() {
        let store = store().await;
        assert_eq!(store.toggle_theme().await.unwrap(), Theme::Light);
        assert_eq!(store.theme().await.unwrap(), Theme::Light);
        assert_eq!(store.toggle_theme().await.unwrap(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_set_theme_overwrites() {
        let store = store().await;
        store.set_theme(Theme::Light).await.unwrap();
        store.set_theme(Theme::Light).await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_invalid_stored_theme_is_reported() {
        let store = store().await;
        store.set("theme", "neon").await.unwrap();
        assert!(matches!(
            store.theme().await,
            Err(HistoryError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }
}
