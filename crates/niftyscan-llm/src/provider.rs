//! Grounded provider trait definition

use crate::{GroundedResponse, GroundingRequest, Result};
use async_trait::async_trait;

/// Trait for grounded completion providers
///
/// Implementations wrap a generative completion service that supports
/// web-search grounding. The scan pipeline only ever talks to this trait,
/// which keeps the normalizer testable against canned text fixtures.
#[async_trait]
pub trait GroundedProvider: Send + Sync {
    /// Generate a grounded completion
    ///
    /// Returns the full completion text plus the web citations the service
    /// reported for it.
    async fn generate(&self, request: GroundingRequest) -> Result<GroundedResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}
