//! Typed analysis records produced by the normalizer
//!
//! Field names serialize in camelCase so a fully-populated record
//! round-trips through the JSON shape the completion service is asked to
//! emit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selectable market index for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketIndex {
    /// NIFTY 50 large caps
    Nifty50,
    /// BANK NIFTY banking index
    BankNifty,
    /// NIFTY 500 broad market
    Nifty500,
}

impl MarketIndex {
    /// Display name as used on the exchange and in the scan prompt
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nifty50 => "NIFTY 50",
            Self::BankNifty => "BANK NIFTY",
            Self::Nifty500 => "NIFTY 500",
        }
    }
}

impl fmt::Display for MarketIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overall or per-sector market sentiment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Trade direction suggested for a setup
///
/// Unlike every other enum field this one has no default: an entry the
/// model emitted without a recommendation stays `None` so the presentation
/// layer can surface the malformed entry instead of silently coercing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationType {
    Buy,
    Sell,
    Hold,
    Avoid,
}

/// How long the suggested trade is meant to be held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeHorizon {
    #[default]
    Intraday,
    /// Buy today, sell tomorrow
    Btst,
    Swing,
    Positional,
}

/// Technical pattern behind a setup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupType {
    Breakout,
    Reversal,
    #[default]
    Momentum,
    SupportBounce,
    ResistanceRejection,
}

/// Price sensitivity of the news catalyst
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewsImpact {
    High,
    Medium,
    #[default]
    Low,
}

/// Momentum rating for a sector on a 1-10 scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorPerformance {
    pub name: String,
    pub strength: u8,
}

/// Web source the completion service claims to have grounded on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

/// Raw grounding citation as reported by the provider
///
/// Title and URI may both be absent; the normalizer maps them to
/// `"Source"` / `"#"` when building [`SourceLink`] values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: Option<String>,
    pub uri: Option<String>,
}

/// A single actionable trade setup
///
/// The price fields (`current_price`, `entry_range`, `target_price`,
/// `stop_loss`) are display strings exactly as the model emitted them,
/// possibly with currency symbols and thousands separators. They are not
/// parsed at this stage; [`crate::extract_price`] re-derives plain numbers
/// where needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecommendation {
    pub symbol: String,
    pub company_name: String,
    pub current_price: String,
    pub entry_range: String,
    pub target_price: String,
    pub stop_loss: String,
    pub trade_horizon: TradeHorizon,
    pub setup_type: SetupType,
    pub sector: String,
    pub sector_sentiment: String,
    pub volume_analysis: String,
    pub news_summary: String,
    pub news_impact: NewsImpact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<RecommendationType>,
    pub reasoning: String,
}

impl StockRecommendation {
    /// Whether this setup trades to the long side
    ///
    /// Anything that is not an explicit BUY (SELL, HOLD, AVOID, or a
    /// missing recommendation) is treated as sell-oriented for alert
    /// crossing logic.
    pub fn is_buy(&self) -> bool {
        self.recommendation == Some(RecommendationType::Buy)
    }
}

/// Root analysis record for one scan
///
/// Immutable once constructed; a new scan fully replaces the previous
/// record rather than merging into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub market_sentiment: Sentiment,
    pub overall_summary: String,
    pub top_sectors: Vec<SectorPerformance>,
    pub weak_sectors: Vec<SectorPerformance>,
    pub stocks: Vec<StockRecommendation>,
    pub source_urls: Vec<SourceLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_labels() {
        assert_eq!(MarketIndex::Nifty50.to_string(), "NIFTY 50");
        assert_eq!(MarketIndex::BankNifty.to_string(), "BANK NIFTY");
        assert_eq!(MarketIndex::Nifty500.to_string(), "NIFTY 500");
    }

    #[test]
    fn test_enum_wire_format() {
        let json = serde_json::to_string(&SetupType::SupportBounce).unwrap();
        assert_eq!(json, "\"SUPPORT_BOUNCE\"");

        let parsed: TradeHorizon = serde_json::from_str("\"BTST\"").unwrap();
        assert_eq!(parsed, TradeHorizon::Btst);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Sentiment::default(), Sentiment::Neutral);
        assert_eq!(TradeHorizon::default(), TradeHorizon::Intraday);
        assert_eq!(SetupType::default(), SetupType::Momentum);
        assert_eq!(NewsImpact::default(), NewsImpact::Low);
    }

    #[test]
    fn test_is_buy() {
        let mut stock = StockRecommendation {
            symbol: "SBIN".to_string(),
            company_name: "State Bank of India".to_string(),
            current_price: "812.40".to_string(),
            entry_range: "810 - 815".to_string(),
            target_price: "830.00".to_string(),
            stop_loss: "804.00".to_string(),
            trade_horizon: TradeHorizon::Btst,
            setup_type: SetupType::Breakout,
            sector: "Banking".to_string(),
            sector_sentiment: "BULLISH".to_string(),
            volume_analysis: "2x avg volume".to_string(),
            news_summary: "Strong quarterly numbers".to_string(),
            news_impact: NewsImpact::High,
            recommendation: Some(RecommendationType::Buy),
            reasoning: "Breakout above resistance".to_string(),
        };
        assert!(stock.is_buy());

        stock.recommendation = Some(RecommendationType::Hold);
        assert!(!stock.is_buy());

        stock.recommendation = None;
        assert!(!stock.is_buy());
    }
}
