//! Domain model and analysis normalizer for niftyscan
//!
//! This crate owns everything that turns the raw text of a grounded LLM
//! completion into data the rest of the system can render without
//! null-checks:
//!
//! - Strictly-typed analysis records ([`MarketAnalysis`],
//!   [`StockRecommendation`], sector ratings, source links)
//! - The normalizer: JSON span location, code-fence stripping, and
//!   field-level defaulting ([`normalize`])
//! - Tolerant numeric extraction from display price strings
//!   ([`extract_price`])
//! - The scan prompt template sent to the completion service
//!
//! The normalizer is a pure transform: it performs no I/O and never
//! partially populates a record. Either it returns a fully-defaulted
//! [`MarketAnalysis`] or it fails with a [`ParseError`].

pub mod error;
pub mod model;
pub mod normalize;
pub mod numeric;
pub mod prompt;

// Re-export main types for convenience
pub use error::{ParseError, Result};
pub use model::{
    Citation, MarketAnalysis, MarketIndex, NewsImpact, RecommendationType, SectorPerformance,
    Sentiment, SetupType, SourceLink, StockRecommendation, TradeHorizon,
};
pub use normalize::normalize;
pub use numeric::extract_price;
pub use prompt::{PromptError, STRATEGIST_SYSTEM, scan_prompt};
