//! Summary provider backed by a local model server's `/api/generate` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::{AiError, SummaryProvider, build_prompt, prepare_content, uses_summarizer};
use crate::summarizer::{AcademicLevel, SummaryMode};

/// Model requested when none is configured.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Sends prompts to `<endpoint>/api/generate` and reads the `response` field.
pub struct HttpSummaryProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl HttpSummaryProvider {
    /// Creates a provider for `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NotAvailable`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, AiError> {
        Self::with_timeout(
            base_url,
            model,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a provider with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NotAvailable`] if the HTTP client cannot be built.
    #[instrument(skip_all, fields(timeout_secs = timeout.as_secs()))]
    pub fn with_timeout(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let client = Client::builder()
            .user_agent(concat!("clarity/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::NotAvailable(format!("HTTP client construction failed: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{GENERATE_PATH}", self.base_url)
    }

    fn capability_error(&self, mode: SummaryMode) -> AiError {
        let provider = self.name().to_string();
        if uses_summarizer(mode) {
            AiError::SummarizerUnavailable { provider }
        } else {
            AiError::WriterUnavailable { provider }
        }
    }
}

impl std::fmt::Debug for HttpSummaryProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSummaryProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SummaryProvider for HttpSummaryProvider {
    fn name(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, content), fields(model = %self.model, chars = content.len()))]
    async fn summarize(
        &self,
        content: &str,
        mode: SummaryMode,
        level: AcademicLevel,
    ) -> Result<String, AiError> {
        let prepared = prepare_content(content);
        let prompt = build_prompt(mode.as_str(), level, &prepared)?;
        let endpoint = self.endpoint();

        debug!(endpoint = %endpoint, prompt_chars = prompt.len(), "sending generate request");
        let response = self
            .client
            .post(&endpoint)
            .json(&GenerateRequest {
                model: &self.model,
                prompt: &prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AiError::NotAvailable(format!("cannot connect to {endpoint}"))
                } else {
                    AiError::request(&endpoint, e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!(model = %self.model, "model or endpoint not found");
            return Err(self.capability_error(mode));
        }
        if !status.is_success() {
            return Err(AiError::http(&endpoint, status.as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::request(&endpoint, e))?;
        let text = body.response.trim();
        if text.is_empty() {
            return Err(AiError::NoResult {
                provider: self.name().to_string(),
            });
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_summarize_reads_response_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "tiny",
                "stream": false
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "response": "  • A point  " })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider = HttpSummaryProvider::new(format!("{}/", server.uri()), "tiny").unwrap();
        let summary = provider
            .summarize("Some text.", SummaryMode::Quick, AcademicLevel::Graduate)
            .await
            .unwrap();
        assert_eq!(summary, "• A point");
    }

    #[tokio::test]
    async fn test_summarize_empty_response_is_no_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let provider = HttpSummaryProvider::new(server.uri(), "tiny").unwrap();
        let result = provider
            .summarize("text", SummaryMode::Study, AcademicLevel::HighSchool)
            .await;
        assert!(matches!(result, Err(AiError::NoResult { .. })));
    }

    #[tokio::test]
    async fn test_summarize_not_found_maps_to_capability() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let provider = HttpSummaryProvider::new(server.uri(), "missing").unwrap();
        let quick = provider
            .summarize("text", SummaryMode::Quick, AcademicLevel::Undergraduate)
            .await;
        assert!(matches!(quick, Err(AiError::SummarizerUnavailable { .. })));
        let exam = provider
            .summarize("text", SummaryMode::Exam, AcademicLevel::Undergraduate)
            .await;
        assert!(matches!(exam, Err(AiError::WriterUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_summarize_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = HttpSummaryProvider::new(server.uri(), "tiny").unwrap();
        let result = provider
            .summarize("text", SummaryMode::Concepts, AcademicLevel::Graduate)
            .await;
        assert!(matches!(result, Err(AiError::Http { status: 503, .. })));
    }

    #[test]
    fn test_debug_omits_client() {
        let provider = HttpSummaryProvider::new("http://localhost:11434", "tiny").unwrap();
        let debug = format!("{provider:?}");
        assert!(debug.contains("localhost:11434"));
        assert!(debug.contains("tiny"));
    }
}
