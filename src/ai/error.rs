//! Error types for generative summary providers.

use thiserror::Error;

/// Errors that can occur while asking a provider for a summary.
#[derive(Debug, Error)]
pub enum AiError {
    /// No generative service is configured or reachable.
    #[error("AI service not available: {0}")]
    NotAvailable(String),

    /// The service cannot produce short summaries (quick and concepts modes).
    #[error("summarizer capability unavailable on {provider}")]
    SummarizerUnavailable {
        /// Provider name.
        provider: String,
    },

    /// The service cannot produce long-form text (study and exam modes).
    #[error("writer capability unavailable on {provider}")]
    WriterUnavailable {
        /// Provider name.
        provider: String,
    },

    /// The service answered without any text.
    #[error("no result returned from {provider}")]
    NoResult {
        /// Provider name.
        provider: String,
    },

    /// The requested mode label is not recognized.
    #[error("unknown summary mode: {0}")]
    UnknownMode(String),

    /// Network-level failure talking to the service.
    #[error("request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint URL.
        endpoint: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("HTTP {status} from {endpoint}")]
    Http {
        /// Endpoint URL.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },
}

/// Display pieces of a friendly error block.
struct Friendly {
    icon: &'static str,
    title: &'static str,
    message: &'static str,
    solution: &'static str,
}

impl AiError {
    /// Creates a request error.
    #[must_use]
    pub fn request(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub fn http(endpoint: impl Into<String>, status: u16) -> Self {
        Self::Http {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// Whether another attempt could plausibly succeed.
    ///
    /// Configuration problems and unknown modes fail the same way every time.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotAvailable(_) | Self::UnknownMode(_) => false,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::SummarizerUnavailable { .. }
            | Self::WriterUnavailable { .. }
            | Self::NoResult { .. }
            | Self::Request { .. } => true,
        }
    }

    fn friendly(&self) -> Friendly {
        match self {
            Self::NotAvailable(_) => Friendly {
                icon: "⚠️",
                title: "AI Not Available",
                message: "Generative AI features are not enabled.",
                solution: "Set <code>ai_endpoint</code> in your config file to a running model server, then try again.",
            },
            Self::SummarizerUnavailable { .. } => Friendly {
                icon: "🤖",
                title: "Summarizer Unavailable",
                message: "The AI summarizer is not available.",
                solution: "Make sure the AI service is running and the configured model is installed, then try again.",
            },
            Self::WriterUnavailable { .. } => Friendly {
                icon: "✍️",
                title: "Writer Unavailable",
                message: "The AI writer is not available.",
                solution: "Make sure the AI service is running and the configured model is installed, then try again.",
            },
            Self::NoResult { .. } => Friendly {
                icon: "🤔",
                title: "No Response from AI",
                message: "The AI service didn't return a result.",
                solution: "Try again with shorter content or different settings.",
            },
            Self::UnknownMode(_) => Friendly {
                icon: "❓",
                title: "Unknown Mode",
                message: "The selected study mode is not recognized.",
                solution: "Please select a valid study mode.",
            },
            Self::Request { .. } | Self::Http { .. } => Friendly {
                icon: "❌",
                title: "AI Processing Error",
                message: "An unexpected error occurred while processing your request.",
                solution: "Try again, or try with shorter content.",
            },
        }
    }

    /// Renders the error as a short markdown block for end users.
    ///
    /// The block always contains a bold title and a `**Solution:**` line.
    #[must_use]
    pub fn user_message(&self) -> String {
        let friendly = self.friendly();
        format!(
            "{} **{}**\n\n{}\n\n**Solution:** {}",
            friendly.icon, friendly.title, friendly.message, friendly.solution
        )
    }
}
