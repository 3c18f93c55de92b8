//! Grounded completion provider abstraction for niftyscan
//!
//! The analysis prompt is answered by an external generative completion
//! service with web-search grounding enabled. That service is an opaque,
//! possibly-unreliable collaborator; this crate pins down the seam:
//!
//! - [`GroundedProvider`] — the pluggable capability
//!   (`generate(request) -> {text, citations}`), so the normalizer can be
//!   exercised with canned fixtures and no live network dependency
//! - [`GroundingRequest`] / [`GroundedResponse`] — request builder and
//!   response types
//! - [`providers::GeminiProvider`] — the production implementation against
//!   the Gemini `generateContent` API with the `googleSearch` tool
//! - [`LLMError`] — the transport-side error taxonomy

pub mod completion;
pub mod error;
pub mod provider;
pub mod providers;

pub use completion::{GroundedResponse, GroundingRequest, GroundingRequestBuilder};
pub use error::{LLMError, Result};
pub use provider::GroundedProvider;

// Citations travel with the completion text into the normalizer
pub use niftyscan_core::Citation;
