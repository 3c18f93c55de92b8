//! Scan prompt template
//!
//! The completion service is treated as an opaque collaborator; the only
//! contract this side controls is the instruction text, which asks for
//! exactly one JSON object in a code block matching the shape the
//! normalizer maps.

use crate::model::MarketIndex;
use minijinja::Environment;
use thiserror::Error;

/// Errors raised while rendering a prompt template
#[derive(Debug, Error)]
pub enum PromptError {
    /// Template rendering failed
    #[error("Failed to render prompt '{name}': {detail}")]
    RenderError { name: String, detail: String },
}

/// System instruction for the scan completion
pub const STRATEGIST_SYSTEM: &str = "You are a forward-looking market strategist. \
You focus on future potential, not past performance. You give precise levels.";

const SCAN_PROMPT: &str = r#"
Act as an elite Live Trader and Technical Analyst for the Indian Stock Market (NSE).
I need actionable **Buy Today Sell Tomorrow (BTST)**, **Intraday**, or **Swing Trading** suggestions for **{{ index }}**.

**Goal:** Do NOT just list stocks that have already gained 5% today. Find stocks that are **setting up** for a move NOW or TOMORROW.

**Strategy to follow:**
1.  **Search Phase (Live Data)**:
    *   Find stocks with **unusual volume spikes** happening right now.
    *   Identify sectors experiencing **live rotation** (money flowing in/out today).
    *   Look for "High Delivery Percentage" stocks (indicates positioning for tomorrow).
    *   Find stocks near key **Breakout levels** or **Support zones**.
    *   **News Analysis**: Prioritize news from the LAST 2 HOURS. Differentiate between "General Company Updates" (Low Impact) and "Price Sensitive News" (High Impact) like earnings, orders, or regulatory changes.

2.  **Analysis Phase (Predictive)**:
    *   **For BUY:** Look for "Bullish Flag patterns", "Support Bounces", or "Volume Breakouts" happening now.
    *   **For SELL:** Look for "Resistance Rejection", "Head and Shoulders breakdowns", or "Weak structures".
    *   Determine strictly: Entry Range, Target, and Stop Loss.
    *   Classify the trade: Is it for today (INTRADAY) or for tomorrow (BTST)?
    *   **Sector Strength**: Rate strong and weak sectors on a scale of 1-10 based on momentum.

3.  **Output**:
    *   Select the top 4-6 best **forward-looking** setups.
    *   Provide the output strictly in the following JSON format inside a code block.

**JSON Schema:**
{% raw %}{
  "marketSentiment": "BULLISH" | "BEARISH" | "NEUTRAL",
  "overallSummary": "Brief outlook on whether to buy dips or sell rallies today/tomorrow.",
  "topSectors": [ {"name": "Sector Name", "strength": 8} ],
  "weakSectors": [ {"name": "Sector Name", "strength": 8} ],
  "stocks": [
    {
      "symbol": "TICKER",
      "companyName": "Company Name",
      "currentPrice": "Live Price INR (e.g. 1240.50)",
      "entryRange": "Ideal Buy/Sell Zone",
      "targetPrice": "Projected Target (e.g. 1260.00)",
      "stopLoss": "Strict Stop Loss (e.g. 1230.00)",
      "tradeHorizon": "INTRADAY" | "BTST" | "SWING",
      "setupType": "BREAKOUT" | "REVERSAL" | "MOMENTUM" | "SUPPORT_BOUNCE",
      "sector": "Sector Name",
      "sectorSentiment": "BULLISH" | "BEARISH" | "NEUTRAL",
      "volumeAnalysis": "e.g., 2x Avg Volume, Accumulation detected",
      "newsSummary": "Key catalyst or reason",
      "newsImpact": "HIGH" | "MEDIUM" | "LOW",
      "recommendation": "BUY" | "SELL",
      "reasoning": "Technical setup description (e.g. crossing 200 EMA with volume)"
    }
  ]
}{% endraw %}
"#;

/// Render the scan instruction for the selected index
pub fn scan_prompt(index: MarketIndex) -> Result<String, PromptError> {
    let env = Environment::new();
    env.render_str(
        SCAN_PROMPT,
        minijinja::context! { index => index.label() },
    )
    .map_err(|e| PromptError::RenderError {
        name: "scan_prompt".to_string(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_index() {
        let prompt = scan_prompt(MarketIndex::BankNifty).unwrap();
        assert!(prompt.contains("**BANK NIFTY**"));
        assert!(!prompt.contains("{{ index }}"));
    }

    #[test]
    fn test_prompt_carries_schema_contract() {
        let prompt = scan_prompt(MarketIndex::Nifty50).unwrap();
        assert!(prompt.contains("\"marketSentiment\""));
        assert!(prompt.contains("\"stopLoss\""));
        assert!(prompt.contains("JSON format inside a code block"));
        // Raw schema braces survive the template engine
        assert!(!prompt.contains("{% raw %}"));
    }

    #[test]
    fn test_system_instruction_is_fixed() {
        assert!(STRATEGIST_SYSTEM.contains("forward-looking market strategist"));
    }
}
