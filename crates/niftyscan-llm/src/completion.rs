//! Grounding request and response types

use niftyscan_core::Citation;
use serde::{Deserialize, Serialize};

/// Request for a grounded completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// The scan instruction
    pub prompt: String,

    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<usize>,

    /// Whether web-search grounding is requested
    pub web_search: bool,
}

/// Response from a grounded completion
///
/// `citations` holds only the grounding chunks that carried a real web
/// reference; chunks without one are dropped at the provider boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroundedResponse {
    /// Full completion text
    pub text: String,

    /// Web sources the service claims to have used
    pub citations: Vec<Citation>,
}

impl GroundingRequest {
    /// Create a builder for grounding requests
    pub fn builder(model: impl Into<String>) -> GroundingRequestBuilder {
        GroundingRequestBuilder::new(model)
    }
}

/// Builder for [`GroundingRequest`]
pub struct GroundingRequestBuilder {
    model: String,
    prompt: String,
    system: Option<String>,
    temperature: Option<f32>,
    max_output_tokens: Option<usize>,
    web_search: bool,
}

impl GroundingRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: String::new(),
            system: None,
            temperature: None,
            max_output_tokens: None,
            web_search: false,
        }
    }

    /// Set the scan instruction
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the system instruction
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the output token cap
    pub fn max_output_tokens(mut self, max: usize) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Enable web-search grounding
    pub fn web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    /// Build the grounding request
    pub fn build(self) -> GroundingRequest {
        GroundingRequest {
            model: self.model,
            prompt: self.prompt,
            system: self.system,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            web_search: self.web_search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = GroundingRequest::builder("gemini-2.5-flash")
            .prompt("Scan NIFTY 50")
            .system("You are a strategist")
            .temperature(0.2)
            .web_search(true)
            .build();

        assert_eq!(request.model, "gemini-2.5-flash");
        assert_eq!(request.prompt, "Scan NIFTY 50");
        assert_eq!(request.temperature, Some(0.2));
        assert!(request.web_search);
        assert_eq!(request.max_output_tokens, None);
    }
}
