//! Analysis normalizer
//!
//! Turns the raw completion text into a [`MarketAnalysis`] with field-level
//! defaults. The completion service is instructed to emit exactly one JSON
//! object inside a markdown code block, but the output is treated as an
//! unreliable text source: the candidate span is located structurally
//! (first `{` through last `}`), fence markers are stripped, and every
//! recognized field is defaulted independently so a partially-conforming
//! payload still renders.

use crate::error::{ParseError, Result};
use crate::model::{
    Citation, MarketAnalysis, SectorPerformance, SourceLink, StockRecommendation,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Normalize raw completion text plus its grounding citations
///
/// Fails with [`ParseError::NoStructuredData`] when no `{...}` span exists
/// anywhere in `raw_text`, and with [`ParseError::MalformedJson`] when the
/// located span is not valid JSON. Unknown fields in the payload are
/// ignored; missing arrays become empty vectors, never null.
pub fn normalize(raw_text: &str, citations: &[Citation]) -> Result<MarketAnalysis> {
    let candidate = locate_candidate(raw_text).ok_or(ParseError::NoStructuredData)?;
    let payload: Value =
        serde_json::from_str(&strip_code_fences(candidate)).map_err(ParseError::MalformedJson)?;

    Ok(MarketAnalysis {
        market_sentiment: enum_or_default(&payload, "marketSentiment"),
        overall_summary: string_or(&payload, "overallSummary", "Analysis complete."),
        top_sectors: sector_list(&payload, "topSectors"),
        weak_sectors: sector_list(&payload, "weakSectors"),
        stocks: payload
            .get("stocks")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(stock_entry).collect())
            .unwrap_or_default(),
        source_urls: citations.iter().map(source_link).collect(),
    })
}

/// First `{` through last `}` of the raw text
///
/// The model is expected to emit exactly one JSON object, so greedy
/// boundary detection is sufficient.
fn locate_candidate(raw_text: &str) -> Option<&str> {
    let start = raw_text.find('{')?;
    let end = raw_text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw_text[start..=end])
}

/// Remove markdown code-fence markers from the candidate span
fn strip_code_fences(candidate: &str) -> String {
    candidate
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn stock_entry(entry: &Value) -> StockRecommendation {
    StockRecommendation {
        symbol: passthrough(entry, "symbol"),
        company_name: passthrough(entry, "companyName"),
        current_price: passthrough(entry, "currentPrice"),
        entry_range: string_or(entry, "entryRange", "At Market"),
        target_price: string_or(entry, "targetPrice", "TBD"),
        stop_loss: string_or(entry, "stopLoss", "TBD"),
        trade_horizon: enum_or_default(entry, "tradeHorizon"),
        setup_type: enum_or_default(entry, "setupType"),
        sector: passthrough(entry, "sector"),
        sector_sentiment: passthrough(entry, "sectorSentiment"),
        volume_analysis: passthrough(entry, "volumeAnalysis"),
        news_summary: passthrough(entry, "newsSummary"),
        news_impact: enum_or_default(entry, "newsImpact"),
        // Deliberately no default: an absent recommendation stays absent
        recommendation: entry
            .get("recommendation")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
        reasoning: passthrough(entry, "reasoning"),
    }
}

fn sector_list(payload: &Value, key: &str) -> Vec<SectorPerformance> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(sector_entry).collect())
        .unwrap_or_default()
}

/// A sector entry is either `{"name": ..., "strength": ...}` or a bare
/// string; strength falls back to 5 whenever the field is not numeric.
fn sector_entry(entry: &Value) -> SectorPerformance {
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .or_else(|| entry.as_str())
        .unwrap_or_default()
        .to_string();

    let strength = entry
        .get("strength")
        .and_then(Value::as_f64)
        .map_or(5, |s| s as u8);

    SectorPerformance { name, strength }
}

fn source_link(citation: &Citation) -> SourceLink {
    SourceLink {
        title: citation.title.clone().unwrap_or_else(|| "Source".to_string()),
        uri: citation.uri.clone().unwrap_or_else(|| "#".to_string()),
    }
}

/// String field with an explicit default when absent or non-string
fn string_or(obj: &Value, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Pass-through string field; absence maps to an empty string
fn passthrough(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Enum field that falls back to the type's default on absence or an
/// unrecognized label
fn enum_or_default<T: DeserializeOwned + Default>(obj: &Value, key: &str) -> T {
    obj.get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}
