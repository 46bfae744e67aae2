//! Theme command handlers.

use anyhow::Result;
use clarity_core::{Database, SettingsStore};

use crate::app_config::EffectiveConfig;
use crate::cli::ThemeCommand;

pub async fn run_theme_command(
    command: Option<ThemeCommand>,
    config: &EffectiveConfig,
) -> Result<()> {
    let db = Database::new(&config.history_db).await?;
    let settings = SettingsStore::new(db);

    match command.unwrap_or(ThemeCommand::Show) {
        ThemeCommand::Show => println!("theme = {}", settings.theme().await?),
        ThemeCommand::Set { theme } => {
            settings.set_theme(theme).await?;
            println!("theme = {theme}");
        }
        ThemeCommand::Toggle => {
            let theme = settings.toggle_theme().await?;
            println!("theme = {theme}");
        }
    }
    Ok(())
}
