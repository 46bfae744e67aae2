//! Generative summary providers.
//!
//! The local summarizer never needs a provider; when one is configured the
//! study session asks it first and falls back to local output on failure.
//!
//! # Architecture
//!
//! - [`SummaryProvider`] is the async seam, boxed as `dyn` by callers.
//! - [`HttpSummaryProvider`] talks to a local model server over JSON.
//! - [`summarize_with_retry`] wraps any provider with a [`RetryPolicy`].

use async_trait::async_trait;

use crate::summarizer::{AcademicLevel, SummaryMode};

mod error;
mod http;
mod retry;

pub use error::AiError;
pub use http::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, HttpSummaryProvider};
pub use retry::{
    DEFAULT_MAX_RETRIES, MAX_CONFIGURABLE_RETRIES, RetryDecision, RetryPolicy,
    summarize_with_retry,
};

/// Content longer than this is cut before it is sent to a provider.
pub const MAX_PROMPT_CONTENT_CHARS: usize = 50_000;

/// A service that turns page text into a study summary.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Short name used in logs and source labels.
    fn name(&self) -> &str;

    /// Produces a summary of `content` for `mode` and `level`.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] when the service is unreachable, rejects the
    /// request, or answers without text.
    async fn summarize(
        &self,
        content: &str,
        mode: SummaryMode,
        level: AcademicLevel,
    ) -> Result<String, AiError>;
}

/// Collapses whitespace and truncates to [`MAX_PROMPT_CONTENT_CHARS`] plus `...`.
#[must_use]
pub fn prepare_content(content: &str) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(MAX_PROMPT_CONTENT_CHARS) {
        Some((cut, _)) => format!("{}...", &collapsed[..cut]),
        None => collapsed,
    }
}

/// Audience description embedded in every prompt.
#[must_use]
pub fn level_context(level: AcademicLevel) -> &'static str {
    match level {
        AcademicLevel::HighSchool => {
            "high school student (ages 14-18). Use very clear, simple language. Avoid complex vocabulary."
        }
        AcademicLevel::Undergraduate => {
            "undergraduate college student (ages 18-22). Use academic but accessible language."
        }
        AcademicLevel::Graduate => {
            "graduate student or researcher (ages 22+). Use advanced terminology and in-depth analysis."
        }
    }
}

/// Builds the generation prompt for a mode label.
///
/// Quick and concepts prompts are summarizer-style instructions followed by
/// the text; study and exam prompts are writer-style briefs.
///
/// # Errors
///
/// Returns [`AiError::UnknownMode`] when `mode` is not a known label.
pub fn build_prompt(mode: &str, level: AcademicLevel, content: &str) -> Result<String, AiError> {
    let mode: SummaryMode = mode
        .parse()
        .map_err(|_| AiError::UnknownMode(mode.to_string()))?;
    let context = level_context(level);
    let prompt = match mode {
        SummaryMode::Quick => format!(
            "Create a concise summary for a {context}. Focus on the main ideas and key points.\n\n{content}"
        ),
        SummaryMode::Concepts => format!(
            "Extract and explain key concepts for a {context}. Focus on the most important ideas.\n\n{content}"
        ),
        SummaryMode::Study => format!(
            "Create a comprehensive study guide for a {context}. Include:\n\
             - Key concepts and main ideas\n\
             - Important details and examples\n\
             - Study tips and strategies\n\
             - Connections between concepts\n\n\
             Content to study: {content}"
        ),
        SummaryMode::Exam => format!(
            "Create exam preparation materials for a {context}. Include:\n\
             - Key content summary\n\
             - Practice questions (multiple choice, short answer, essay)\n\
             - Study strategies\n\
             - Important terms to review\n\n\
             Content for exam prep: {content}"
        ),
    };
    Ok(prompt)
}

/// Whether a mode is served by the summarizer capability (vs the writer).
#[must_use]
pub fn uses_summarizer(mode: SummaryMode) -> bool {
    matches!(mode, SummaryMode::Quick | SummaryMode::Concepts)
}
