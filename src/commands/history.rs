//! History command handlers: list, show, search, clear, export.

use std::path::PathBuf;

use anyhow::Result;
use clarity_core::{
    Database, ExportFormat, HistoryEntry, HistoryStore, StudyMaterial, SummarySource,
};

use crate::app_config::EffectiveConfig;
use crate::cli::HistoryCommand;
use crate::commands::summarize::export_material;

fn render_row(entry: &HistoryEntry) -> String {
    format!(
        "[{}] {}  {} ({}, {})\n    {}",
        entry.id,
        entry.created_at,
        entry.title,
        entry.mode().label(),
        entry.level().display_name(),
        entry.preview()
    )
}

fn material_from_entry(entry: HistoryEntry) -> StudyMaterial {
    StudyMaterial {
        mode: entry.mode(),
        level: entry.level(),
        source: SummarySource::from_label(&entry.source),
        title: entry.title,
        summary: entry.summary,
        fallback_reason: None,
    }
}

pub async fn run_history_command(command: &HistoryCommand, config: &EffectiveConfig) -> Result<()> {
    let db = Database::new(&config.history_db).await?;
    let store = HistoryStore::new(db);

    match command {
        HistoryCommand::List => {
            let entries = store.list().await?;
            if entries.is_empty() {
                println!("No saved summaries yet. Use `clarity summarize --save` to keep one.");
                return Ok(());
            }
            for entry in &entries {
                println!("{}", render_row(entry));
            }
        }
        HistoryCommand::Show { id } => {
            let entry = store.get(*id).await?;
            println!("{}", entry.title);
            println!(
                "{} | {} | {}",
                entry.mode().label(),
                entry.level().display_name(),
                entry.created_at
            );
            println!();
            println!("{}", entry.summary);
            println!();
            println!("Source: {}", entry.source);
        }
        HistoryCommand::Search { query } => {
            let ranked = store.search(query).await?;
            if ranked.is_empty() {
                println!("No saved summaries matched \"{query}\".");
                return Ok(());
            }
            for result in &ranked {
                println!(
                    "{}  (matched {})",
                    render_row(&result.entry),
                    result.matched_field
                );
            }
        }
        HistoryCommand::Clear => {
            let removed = store.clear().await?;
            println!("Cleared {removed} saved summaries.");
        }
        HistoryCommand::Export { id, format, output } => {
            let entry = store.get(*id).await?;
            let path = export_entry(entry, *format, output.clone())?;
            println!("Exported {format} to {}", path.display());
        }
    }

    Ok(())
}

fn export_entry(entry: HistoryEntry, format: ExportFormat, output: Option<PathBuf>) -> Result<PathBuf> {
    export_material(&material_from_entry(entry), format, output)
}
