//! Gemini provider implementation
//!
//! Implements [`GroundedProvider`] against the Gemini `generateContent`
//! REST API with the `google_search` tool for web grounding.
//! See: https://ai.google.dev/api/generate-content

use crate::{GroundedProvider, GroundedResponse, GroundingRequest, LLMError, Result};
use async_trait::async_trait;
use niftyscan_core::Citation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the Gemini API (default: the public v1beta endpoint)
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `GEMINI_API_KEY` and optionally the base URL
    /// from `GEMINI_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            LLMError::ConfigurationError("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        let api_base =
            std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Gemini completion provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a provider with the given configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a provider from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }
}

#[async_trait]
impl GroundedProvider for GeminiProvider {
    async fn generate(&self, request: GroundingRequest) -> Result<GroundedResponse> {
        let wire_request = GeminiRequest::from(&request);
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, request.model
        );

        debug!(
            model = %request.model,
            web_search = request.web_search,
            "Sending grounded completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&wire_request)
            .send()
            .await?;

        // Handle errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(request.model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let wire_response: GeminiResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let grounded = wire_response.into_grounded()?;

        debug!(
            text_len = grounded.text.len(),
            citations = grounded.citations.len(),
            "Received grounded completion"
        );

        Ok(grounded)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini-specific request/response types
// These match the generateContent REST format exactly

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
struct WireTool {
    google_search: serde_json::Value,
}

impl From<&GroundingRequest> for GeminiRequest {
    fn from(request: &GroundingRequest) -> Self {
        let generation_config = if request.temperature.is_some()
            || request.max_output_tokens.is_some()
        {
            Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            })
        } else {
            None
        };

        Self {
            contents: vec![WireContent {
                parts: vec![WirePart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system.as_ref().map(|system| WireContent {
                parts: vec![WirePart {
                    text: system.clone(),
                }],
            }),
            generation_config,
            tools: request.web_search.then(|| {
                vec![WireTool {
                    google_search: serde_json::json!({}),
                }]
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    content: Option<WireContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    uri: Option<String>,
    title: Option<String>,
}

impl GeminiResponse {
    /// Flatten the first candidate into completion text plus web citations
    ///
    /// Grounding chunks without a web reference are dropped here so the
    /// normalizer only ever sees citations that had a real source.
    fn into_grounded(self) -> Result<GroundedResponse> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No candidates returned".to_string()))?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let citations = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| Citation {
                        title: web.title,
                        uri: web.uri,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(GroundedResponse { text, citations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = GeminiProvider::with_config(GeminiConfig::new("test-key"));
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().name(), "gemini");
    }

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::new("key");
        assert_eq!(config.api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let config = config.with_api_base("http://localhost:8000").with_timeout(30);
        assert_eq!(config.api_base, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_from_env_without_key() {
        // SAFETY: This is a test that modifies env vars, which is safe in single-threaded test context
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }
        let result = GeminiConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_request_wire_format() {
        let request = GroundingRequest::builder("gemini-2.5-flash")
            .prompt("Scan NIFTY 50")
            .system("You are a strategist")
            .temperature(0.2)
            .web_search(true)
            .build();

        let wire = serde_json::to_value(GeminiRequest::from(&request)).unwrap();
        assert_eq!(wire["contents"][0]["parts"][0]["text"], "Scan NIFTY 50");
        assert_eq!(
            wire["systemInstruction"]["parts"][0]["text"],
            "You are a strategist"
        );
        assert!((wire["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
        assert!(wire["tools"][0]["google_search"].is_object());
    }

    #[test]
    fn test_response_flattening_filters_non_web_chunks() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "```json\n{}\n"}, {"text": "```"}]},
                "groundingMetadata": {
                    "groundingChunks": [
                        {"web": {"uri": "https://example.com/nse", "title": "NSE Live"}},
                        {"retrievedContext": {"uri": "gs://bucket/doc"}},
                        {"web": {"uri": null, "title": null}}
                    ]
                }
            }]
        });

        let response: GeminiResponse = serde_json::from_value(raw).unwrap();
        let grounded = response.into_grounded().unwrap();

        assert_eq!(grounded.text, "```json\n{}\n```");
        assert_eq!(grounded.citations.len(), 2);
        assert_eq!(grounded.citations[0].title.as_deref(), Some("NSE Live"));
        assert_eq!(grounded.citations[1].title, None);
    }

    #[test]
    fn test_empty_candidates_is_unexpected_response() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        let err = response.into_grounded().unwrap_err();
        assert!(matches!(err, LLMError::UnexpectedResponse(_)));
    }
}
