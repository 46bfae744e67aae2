//! Clarity Core Library
//!
//! Turns the readable text of a web page or document into study-oriented
//! summaries: a quick overview, key concepts, a study guide, or exam prep,
//! each pitched at a high-school, undergraduate, or graduate reader.
//!
//! # Architecture
//!
//! - [`summarizer`] - Deterministic extractive summarizer; never fails
//! - [`extract`] - Readable-text extraction from HTML, PDF, and files
//! - [`ai`] - Optional generative providers with retry
//! - [`study`] - AI-first orchestration with local fallback
//! - [`format`] - Markdown to HTML and plain text
//! - [`export`] - HTML, JSON, and text export files
//! - [`db`] / [`history`] - Saved summaries and settings in SQLite

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ai;
pub mod db;
pub mod export;
pub mod extract;
pub mod format;
pub mod history;
pub mod study;
pub mod summarizer;

// Re-export commonly used types
pub use ai::{AiError, HttpSummaryProvider, RetryPolicy, SummaryProvider, summarize_with_retry};
pub use db::{Database, DbError};
pub use export::{ExportError, ExportFormat, default_file_name, render_export, write_export};
pub use extract::{ExtractError, LoadedPage, PageSource, load_page};
pub use history::{
    HistoryEntry, HistoryError, HistoryStore, NewHistoryEntry, SettingsStore, Theme,
};
pub use study::{StudyError, StudyMaterial, StudySession, SummarySource};
pub use summarizer::{AcademicLevel, LocalSummarizer, SummaryMode, summarize_locally};
