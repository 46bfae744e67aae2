//! Local extractive summarizer.
//!
//! A pure pipeline over one string of page text:
//!
//! 1. [`segmenter`] normalizes whitespace, splits sentences, and drops
//!    boilerplate, navigation and fragments.
//! 2. [`keywords`] builds a stopword-filtered term-frequency table.
//! 3. [`scorer`] scores sentences by keyword frequency, position and cue words.
//! 4. [`render`] selects the top sentences for the requested [`SummaryMode`]
//!    and fills the [`AcademicLevel`] templates from [`profile`].
//!
//! [`summarize_locally`] never fails: insufficient content and internal errors
//! both come back as user-facing placeholder strings.
//!
//! # Example
//!
//! ```
//! use clarity_core::summarizer::{AcademicLevel, SummaryMode, summarize_locally};
//!
//! let text = "Too short.";
//! let out = summarize_locally(text, SummaryMode::Quick, AcademicLevel::HighSchool);
//! assert!(out.starts_with("• Not enough quality content"));
//! ```

pub mod keywords;
pub mod profile;
pub mod render;
pub mod scorer;
pub mod segmenter;

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, instrument};

pub use keywords::KeywordTable;
pub use profile::{LevelProfile, ModeTemplate, level_profile};
pub use scorer::ScoredSentence;
pub use segmenter::{PunctuationSegmenter, Sentence, SentenceSegmenter};

/// Returned when no sentence survives the quality filter.
pub const INSUFFICIENT_CONTENT_MESSAGE: &str =
    "• Not enough quality content to summarize. Try a different webpage with more substantial text.";

/// Returned when summarization fails unexpectedly.
pub const INTERNAL_ERROR_MESSAGE: &str = "• Error generating summary";

/// Output style of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryMode {
    /// A handful of key points.
    Quick,
    /// Key terms plus annotated study points.
    #[default]
    Study,
    /// Key terms plus concept explanations.
    Concepts,
    /// Key terms plus practice questions.
    Exam,
}

impl SummaryMode {
    /// All modes in display order.
    pub const ALL: [Self; 4] = [Self::Quick, Self::Study, Self::Concepts, Self::Exam];

    /// Returns the stable string label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Study => "study",
            Self::Concepts => "concepts",
            Self::Exam => "exam",
        }
    }

    /// Parses a mode label, falling back to [`SummaryMode::Study`] for unknown values.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Human-readable heading for the mode.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Quick => "Quick Summary",
            Self::Study => "Study Guide",
            Self::Concepts => "Key Concepts",
            Self::Exam => "Exam Prep + Quiz",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SummaryMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "quick" => Ok(Self::Quick),
            "study" => Ok(Self::Study),
            "concepts" => Ok(Self::Concepts),
            "exam" => Ok(Self::Exam),
            other => Err(format!(
                "invalid summary mode: {other} (expected quick, study, concepts, or exam)"
            )),
        }
    }
}

/// Audience tier controlling vocabulary and depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcademicLevel {
    HighSchool,
    #[default]
    Undergraduate,
    Graduate,
}

impl AcademicLevel {
    /// All levels from least to most advanced.
    pub const ALL: [Self; 3] = [Self::HighSchool, Self::Undergraduate, Self::Graduate];

    /// Returns the stable string label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HighSchool => "high-school",
            Self::Undergraduate => "undergraduate",
            Self::Graduate => "graduate",
        }
    }

    /// Parses a level label, falling back to [`AcademicLevel::Undergraduate`] for unknown values.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Label with spaces, e.g. "high school".
    #[must_use]
    pub fn display_name(self) -> String {
        self.as_str().replacen('-', " ", 1)
    }
}

impl fmt::Display for AcademicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AcademicLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "high-school" => Ok(Self::HighSchool),
            "undergraduate" => Ok(Self::Undergraduate),
            "graduate" => Ok(Self::Graduate),
            other => Err(format!(
                "invalid academic level: {other} (expected high-school, undergraduate, or graduate)"
            )),
        }
    }
}

/// Failures inside the local pipeline.
///
/// These never cross [`summarize_locally`]; they are mapped to placeholders.
#[derive(Debug, Error, PartialEq)]
pub enum SummarizeError {
    /// No sentence passed the quality filter.
    #[error("not enough quality content to summarize")]
    InsufficientContent,

    /// Scoring or rendering produced an unusable result.
    #[error("summarization failed: {0}")]
    Internal(String),
}

/// Intermediate results of one pipeline run, before rendering.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Kept sentences with their scores, in source order.
    pub scored: Vec<ScoredSentence>,
    /// Top keywords, most frequent first.
    pub keywords: Vec<String>,
}

/// Extractive summarizer with a pluggable sentence segmentation strategy.
#[derive(Debug, Clone, Default)]
pub struct LocalSummarizer<S = PunctuationSegmenter> {
    segmenter: S,
}

impl<S: SentenceSegmenter> LocalSummarizer<S> {
    /// Creates a summarizer that splits sentences with `segmenter`.
    #[must_use]
    pub fn with_segmenter(segmenter: S) -> Self {
        Self { segmenter }
    }

    /// Runs normalization, segmentation, keyword extraction and scoring.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::InsufficientContent`] when no sentence
    /// survives filtering, and [`SummarizeError::Internal`] when a score is
    /// not a finite number.
    #[instrument(skip_all, fields(chars = content.len()))]
    pub fn analyze(&self, content: &str) -> Result<Analysis, SummarizeError> {
        let text = segmenter::normalize_text(content);
        let sentences = segmenter::segment(&text, &self.segmenter);
        if sentences.is_empty() {
            return Err(SummarizeError::InsufficientContent);
        }

        let table = KeywordTable::build(&text);
        let keywords = table.top_keywords();
        let scored = scorer::score_sentences(&sentences, &table);

        if let Some(bad) = scored.iter().find(|s| !s.score.is_finite()) {
            return Err(SummarizeError::Internal(format!(
                "non-finite score for sentence {}",
                bad.index
            )));
        }

        debug!(
            sentences = scored.len(),
            keywords = keywords.len(),
            "analysis complete"
        );
        Ok(Analysis { scored, keywords })
    }

    /// Produces the rendered summary or a pipeline error.
    ///
    /// # Errors
    ///
    /// See [`LocalSummarizer::analyze`].
    pub fn try_summarize(
        &self,
        content: &str,
        mode: SummaryMode,
        level: AcademicLevel,
    ) -> Result<String, SummarizeError> {
        let analysis = self.analyze(content)?;
        Ok(render::render(
            &analysis.scored,
            &analysis.keywords,
            mode,
            level_profile(level),
        ))
    }

    /// Produces the rendered summary, or a placeholder when that is impossible.
    ///
    /// Never panics and never returns an empty string.
    #[must_use]
    #[instrument(skip(self, content), fields(chars = content.len()))]
    pub fn summarize(&self, content: &str, mode: SummaryMode, level: AcademicLevel) -> String {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.try_summarize(content, mode, level)
        }));

        match outcome {
            Ok(Ok(summary)) => summary,
            Ok(Err(SummarizeError::InsufficientContent)) => {
                debug!("no sentence passed the quality filter");
                INSUFFICIENT_CONTENT_MESSAGE.to_string()
            }
            Ok(Err(err)) => {
                error!(error = %err, "local summarizer failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            Err(_) => {
                error!("local summarizer panicked");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// Summarizes `content` with the default punctuation segmenter.
///
/// This is total: it always returns a non-empty string.
#[must_use]
pub fn summarize_locally(content: &str, mode: SummaryMode, level: AcademicLevel) -> String {
    LocalSummarizer::<PunctuationSegmenter>::default().summarize(content, mode, level)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PHOTOSYNTHESIS: &str = "Photosynthesis is the process that plants use to turn light into food. \
        The process takes place inside the chloroplasts of every green leaf cell. \
        Chlorophyll is the pigment that absorbs light and gives the leaves their color. \
        During the light reactions, water molecules are split and oxygen is released. \
        The energy captured from light is stored in molecules called ATP and NADPH. \
        In the Calvin cycle, the plant uses this energy to fix carbon dioxide. \
        The sugar produced by the cycle can be stored as starch for later use. \
        Scientists study photosynthesis because it supports almost all life on Earth. \
        Without this process, the atmosphere would contain very little oxygen today. \
        Farmers can improve crop yields when they understand how plants capture light.";

    #[test]
    fn test_mode_parse_strict_and_lenient() {
        assert_eq!("exam".parse::<SummaryMode>().unwrap(), SummaryMode::Exam);
        assert!("poetry".parse::<SummaryMode>().is_err());
        assert_eq!(SummaryMode::parse_lenient("poetry"), SummaryMode::Study);
        assert_eq!(SummaryMode::parse_lenient("quick"), SummaryMode::Quick);
    }

    #[test]
    fn test_level_parse_strict_and_lenient() {
        assert_eq!(
            "high-school".parse::<AcademicLevel>().unwrap(),
            AcademicLevel::HighSchool
        );
        assert!("phd".parse::<AcademicLevel>().is_err());
        assert_eq!(
            AcademicLevel::parse_lenient("phd"),
            AcademicLevel::Undergraduate
        );
    }

    #[test]
    fn test_level_display_name() {
        assert_eq!(AcademicLevel::HighSchool.display_name(), "high school");
        assert_eq!(AcademicLevel::Graduate.display_name(), "graduate");
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(SummaryMode::Exam.label(), "Exam Prep + Quiz");
        assert_eq!(SummaryMode::Quick.to_string(), "quick");
    }

    #[test]
    fn test_analyze_rejects_fragments() {
        let result = LocalSummarizer::<PunctuationSegmenter>::default().analyze("Home. About. Menu.");
        assert_eq!(result.unwrap_err(), SummarizeError::InsufficientContent);
    }

    #[test]
    fn test_analyze_keeps_all_quality_sentences() {
        let analysis = LocalSummarizer::<PunctuationSegmenter>::default()
            .analyze(PHOTOSYNTHESIS)
            .unwrap();
        assert_eq!(analysis.scored.len(), 10);
        assert!(analysis.keywords.len() <= keywords::MAX_KEYWORDS);
        assert_eq!(analysis.keywords[0], "light");
    }

    #[test]
    fn test_summarize_quick_high_school_has_three_points() {
        let out = summarize_locally(PHOTOSYNTHESIS, SummaryMode::Quick, AcademicLevel::HighSchool);
        assert!(out.contains("HIGH SCHOOL QUICK SUMMARY"));
        assert_eq!(out.matches("**Key Point ").count(), 3);
        assert!(out.contains("✨ **Awesome!**"));
    }

    #[test]
    fn test_summarize_insufficient_content_placeholder() {
        let out = summarize_locally("Click here to sign up.", SummaryMode::Exam, AcademicLevel::Graduate);
        assert_eq!(out, INSUFFICIENT_CONTENT_MESSAGE);
    }

    #[test]
    fn test_summarize_recovers_from_panicking_segmenter() {
        struct PanickingSegmenter;
        impl SentenceSegmenter for PanickingSegmenter {
            fn split<'a>(&self, _text: &'a str) -> Vec<&'a str> {
                panic!("segmenter exploded");
            }
        }

        let summarizer = LocalSummarizer::with_segmenter(PanickingSegmenter);
        let out = summarizer.summarize(PHOTOSYNTHESIS, SummaryMode::Study, AcademicLevel::Graduate);
        assert_eq!(out, INTERNAL_ERROR_MESSAGE);
    }
}
