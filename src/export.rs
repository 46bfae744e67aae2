//! Study material export to standalone HTML, JSON, or plain text files.

use std::fmt;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::format::{escape_html, to_html, to_plain_text};
use crate::study::StudyMaterial;

/// Title used when the material has none.
pub const DEFAULT_EXPORT_TITLE: &str = "Clarity Study Material";

const EXPORT_SOURCE: &str = "Clarity Study Companion";

/// Errors produced while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination already exists; exports never overwrite.
    #[error("refusing to overwrite existing file: {}", .0.display())]
    AlreadyExists(PathBuf),
    /// I/O error writing the export.
    #[error("I/O error writing export: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Html,
    Json,
    Text,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }

    /// Returns the stable string label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!(
                "invalid export format: {other} (expected html, json, or text)"
            )),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    title: &'a str,
    summary: &'a str,
    mode: &'a str,
    level: &'a str,
    timestamp: String,
    source: &'a str,
    metadata: JsonMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMetadata {
    content_length: usize,
    word_count: usize,
    generated_with: String,
}

fn display_title(material: &StudyMaterial) -> &str {
    if material.title.trim().is_empty() {
        DEFAULT_EXPORT_TITLE
    } else {
        &material.title
    }
}

/// Renders `material` in `format`.
///
/// # Errors
///
/// Returns [`ExportError::Serialize`] if JSON encoding fails.
pub fn render_export(
    material: &StudyMaterial,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Html => Ok(render_html(material, generated_at)),
        ExportFormat::Json => render_json(material, generated_at),
        ExportFormat::Text => Ok(render_text(material)),
    }
}

fn render_html(material: &StudyMaterial, generated_at: DateTime<Utc>) -> String {
    let title = escape_html(display_title(material));
    let date = generated_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }}
    h1 {{ color: #333; border-bottom: 2px solid #4CAF50; padding-bottom: 10px; }}
    .metadata {{ color: #666; font-size: 14px; margin-bottom: 20px; }}
    strong {{ color: #2c3e50; }}
    ul {{ margin: 15px 0; }}
    li {{ margin-bottom: 8px; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <div class="metadata">
    Generated by {EXPORT_SOURCE}<br>
    Mode: {mode}<br>
    Level: {level}<br>
    Date: {date}
  </div>
  <div>
    {summary}
  </div>
</body>
</html>
"#,
        mode = material.mode.label(),
        level = material.level.display_name(),
        summary = to_html(&material.summary),
    )
}

fn render_json(
    material: &StudyMaterial,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let export = JsonExport {
        title: display_title(material),
        summary: &material.summary,
        mode: material.mode.as_str(),
        level: material.level.as_str(),
        timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        source: EXPORT_SOURCE,
        metadata: JsonMetadata {
            content_length: material.summary.chars().count(),
            word_count: material.summary.split_whitespace().count(),
            generated_with: material.source_label(),
        },
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

fn render_text(material: &StudyMaterial) -> String {
    format!(
        "{}\nMode: {}\nLevel: {}\n\n{}\n",
        display_title(material),
        material.mode.label(),
        material.level.display_name(),
        to_plain_text(&material.summary).trim_end()
    )
}

/// Default file name, e.g. `clarity-study-1700000000000.json`.
#[must_use]
pub fn default_file_name(format: ExportFormat, millis: i64) -> String {
    format!("clarity-study-{millis}.{}", format.extension())
}

/// Writes `contents` to `path`, refusing to overwrite.
///
/// A partially written file is removed on failure.
///
/// # Errors
///
/// Returns [`ExportError::AlreadyExists`] when `path` exists, or
/// [`ExportError::Io`] on other I/O failures.
#[instrument(skip(contents), fields(path = %path.display(), bytes = contents.len()))]
pub fn write_export(path: &Path, contents: &str) -> Result<PathBuf, ExportError> {
    let file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Err(ExportError::AlreadyExists(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };

    let write_result = {
        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents.as_bytes())
            .and_then(|()| writer.flush())
    };
    if let Err(err) = write_result {
        let _ = fs::remove_file(path);
        return Err(err.into());
    }

    debug!("export written");
    Ok(path.to_path_buf())
}
