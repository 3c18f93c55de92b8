//! Error types for analysis normalization

use thiserror::Error;

/// Result type alias for normalization operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while extracting structured data from a completion
///
/// The two variants are deliberately distinct: [`ParseError::NoStructuredData`]
/// means the model ignored the output-format instruction entirely (no JSON
/// object anywhere in the text), while [`ParseError::MalformedJson`] means a
/// candidate object was found but did not parse. Callers surface both with a
/// uniform message rather than the underlying parser diagnostics.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No `{...}` span present in the completion text
    #[error("No structured data found in analysis")]
    NoStructuredData,

    /// A candidate span was located but is not valid JSON
    #[error("Failed to parse market data structure")]
    MalformedJson(#[source] serde_json::Error),
}
