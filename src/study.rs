//! Study session orchestration: AI provider first, local summarizer as fallback.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::ai::{RetryPolicy, SummaryProvider, summarize_with_retry};
use crate::summarizer::{AcademicLevel, SummaryMode, summarize_locally};

/// Pages with less text than this are rejected before summarization.
pub const MIN_CONTENT_CHARS: usize = 100;

/// Footer label for locally generated summaries.
pub const LOCAL_SOURCE_LABEL: &str = "Local Summarizer (AI unavailable)";

/// Errors that stop a session from producing any material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudyError {
    /// The page has too little text to summarize.
    #[error("Not enough content found on this page")]
    NotEnoughContent,
}

/// Which engine produced a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SummarySource {
    /// A generative provider, by name.
    Ai {
        /// Provider name.
        provider: String,
    },
    /// The built-in extractive summarizer.
    Local,
}

impl SummarySource {
    /// Footer label shown under a summary.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Ai { provider } => format!("AI ({provider})"),
            Self::Local => LOCAL_SOURCE_LABEL.to_string(),
        }
    }

    /// Parses a label produced by [`SummarySource::label`].
    ///
    /// Unrecognized labels are treated as the local summarizer.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label
            .strip_prefix("AI (")
            .and_then(|rest| rest.strip_suffix(')'))
            .map_or(Self::Local, |provider| Self::Ai {
                provider: provider.to_string(),
            })
    }
}

/// A finished summary with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyMaterial {
    pub title: String,
    pub summary: String,
    pub mode: SummaryMode,
    pub level: AcademicLevel,
    pub source: SummarySource,
    /// Friendly explanation of why the provider was not used, if it failed.
    pub fallback_reason: Option<String>,
}

impl StudyMaterial {
    /// Footer label for the producing engine.
    #[must_use]
    pub fn source_label(&self) -> String {
        self.source.label()
    }
}

/// Produces study material for one page at a time.
pub struct StudySession {
    provider: Option<Box<dyn SummaryProvider>>,
    policy: RetryPolicy,
    local_only: bool,
}

impl std::fmt::Debug for StudySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudySession")
            .field("provider", &self.provider.as_ref().map(|p| p.name().to_string()))
            .field("policy", &self.policy)
            .field("local_only", &self.local_only)
            .finish()
    }
}

impl StudySession {
    /// A session that only uses the local summarizer.
    #[must_use]
    pub fn local() -> Self {
        Self {
            provider: None,
            policy: RetryPolicy::default(),
            local_only: true,
        }
    }

    /// A session that tries `provider` before falling back.
    #[must_use]
    pub fn with_provider(provider: Box<dyn SummaryProvider>, policy: RetryPolicy) -> Self {
        Self {
            provider: Some(provider),
            policy,
            local_only: false,
        }
    }

    /// Forces local summarization even when a provider is configured.
    #[must_use]
    pub fn local_only(mut self, local_only: bool) -> Self {
        self.local_only = local_only;
        self
    }

    /// Summarizes `content`.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NotEnoughContent`] for content shorter than
    /// [`MIN_CONTENT_CHARS`]. Provider failures never surface as errors.
    #[instrument(skip(self, content, title), fields(chars = content.len()))]
    pub async fn generate(
        &self,
        content: &str,
        title: &str,
        mode: SummaryMode,
        level: AcademicLevel,
    ) -> Result<StudyMaterial, StudyError> {
        if content.trim().chars().count() < MIN_CONTENT_CHARS {
            return Err(StudyError::NotEnoughContent);
        }

        let mut fallback_reason = None;
        if let Some(provider) = self.provider.as_deref().filter(|_| !self.local_only) {
            match summarize_with_retry(provider, &self.policy, content, mode, level).await {
                Ok(summary) => {
                    info!(provider = provider.name(), "AI summary generated");
                    return Ok(StudyMaterial {
                        title: title.to_string(),
                        summary,
                        mode,
                        level,
                        source: SummarySource::Ai {
                            provider: provider.name().to_string(),
                        },
                        fallback_reason: None,
                    });
                }
                Err(error) => {
                    warn!(error = %error, "AI summary failed; using local summarizer");
                    fallback_reason = Some(error.user_message());
                }
            }
        }

        Ok(StudyMaterial {
            title: title.to_string(),
            summary: summarize_locally(content, mode, level),
            mode,
            level,
            source: SummarySource::Local,
            fallback_reason,
        })
    }
}
