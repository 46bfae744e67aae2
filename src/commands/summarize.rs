//! Summarize and local command handlers.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clarity_core::ai::{HttpSummaryProvider, RetryPolicy};
use clarity_core::extract::build_fetch_client;
use clarity_core::format::to_html;
use clarity_core::{
    Database, ExportFormat, HistoryStore, NewHistoryEntry, PageSource, StudyMaterial,
    StudySession, default_file_name, load_page, render_export, summarize_locally, write_export,
};
use tracing::{debug, info, warn};

use crate::app_config::EffectiveConfig;
use crate::cli::{ModeLevelArgs, SummarizeArgs};
use crate::progress::Spinner;

/// Reads all of stdin, failing when stdin is an interactive terminal.
fn read_stdin() -> Result<String> {
    if io::stdin().is_terminal() {
        bail!(
            "No input provided. Pass --url or --file, or pipe page text via stdin.\n\
             Example: curl -s https://example.com/article | clarity summarize"
        );
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn page_source(args: &SummarizeArgs) -> Result<PageSource> {
    if let Some(url) = &args.url {
        return Ok(PageSource::Url(url.clone()));
    }
    if let Some(path) = &args.file {
        return Ok(PageSource::File(path.clone()));
    }
    Ok(PageSource::Stdin(read_stdin()?))
}

fn build_session(config: &EffectiveConfig, local_only: bool) -> Result<StudySession> {
    let Some(endpoint) = config.ai_endpoint.as_deref() else {
        debug!("no AI endpoint configured; using local summarizer");
        return Ok(StudySession::local());
    };
    let provider = HttpSummaryProvider::with_timeout(
        endpoint,
        config.ai_model.clone(),
        Duration::from_secs(config.ai_timeout_secs),
    )?;
    Ok(StudySession::with_provider(
        Box::new(provider),
        RetryPolicy::with_max_retries(config.ai_max_retries),
    )
    .local_only(local_only || config.local_only))
}

fn print_material(material: &StudyMaterial, html: bool) {
    if html {
        println!("{}", to_html(&material.summary));
    } else {
        println!("{}", material.summary);
    }
    println!();
    println!("Source: {}", material.source_label());
}

/// Exports `material`, returning the written path.
pub(crate) fn export_material(
    material: &StudyMaterial,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let now = Utc::now();
    let path = output
        .unwrap_or_else(|| PathBuf::from(default_file_name(format, now.timestamp_millis())));
    let contents = render_export(material, format, now)?;
    let written = write_export(&path, &contents)?;
    Ok(written)
}

pub async fn run_summarize_command(
    args: &SummarizeArgs,
    config: &EffectiveConfig,
    quiet: bool,
) -> Result<()> {
    let mode = args.selection.mode.unwrap_or(config.mode);
    let level = args.selection.level.unwrap_or(config.level);
    let source = page_source(args)?;

    let spinner = Spinner::start(quiet, "Extracting page content...");
    let client = build_fetch_client().context("Failed to build HTTP client")?;
    let page = match load_page(&source, &client).await {
        Ok(page) => page,
        Err(error) => {
            spinner.finish();
            return Err(error.into());
        }
    };
    info!(
        title = %page.title,
        chars = page.content.len(),
        is_pdf = page.is_pdf,
        "page loaded"
    );

    spinner.set_message("Generating summary...");
    let session = build_session(config, args.local_only)?;
    let result = session.generate(&page.content, &page.title, mode, level).await;
    spinner.finish();
    let material = result?;

    if let Some(reason) = &material.fallback_reason {
        warn!("AI summary unavailable; showing local summary");
        eprintln!("{reason}\n");
    }
    print_material(&material, args.html);

    if args.save {
        let db = Database::new(&config.history_db).await?;
        let id = HistoryStore::new(db)
            .save(&NewHistoryEntry::from(&material))
            .await?;
        eprintln!("Saved to history (id {id})");
    }

    if let Some(format) = args.export {
        let path = export_material(&material, format, args.output.clone())?;
        eprintln!("Exported {format} to {}", path.display());
    }

    Ok(())
}

pub fn run_local_command(args: &ModeLevelArgs, config: &EffectiveConfig) -> Result<()> {
    let mode = args.mode.unwrap_or(config.mode);
    let level = args.level.unwrap_or(config.level);
    let content = read_stdin()?;
    println!("{}", summarize_locally(&content, mode, level));
    Ok(())
}
