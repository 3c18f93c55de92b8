//! Plain-text rendering of scan results and live toasts

use niftyscan_core::{MarketAnalysis, SectorPerformance, StockRecommendation};
use niftyscan_engine::{PriceDirection, Toast, ToastKind};

/// Render the market overview block (sentiment, summary, sector strength)
pub fn overview(analysis: &MarketAnalysis) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Market Sentiment: {:?}\n",
        analysis.market_sentiment
    ));
    out.push_str(&format!("Summary: {}\n", analysis.overall_summary));

    out.push_str("\nStrong Sectors:\n");
    out.push_str(&sector_block(&analysis.top_sectors));
    out.push_str("\nWeak Sectors:\n");
    out.push_str(&sector_block(&analysis.weak_sectors));

    out
}

fn sector_block(sectors: &[SectorPerformance]) -> String {
    if sectors.is_empty() {
        return "  (none detected)\n".to_string();
    }

    let mut out = String::new();
    for sector in sectors {
        let filled = usize::from(sector.strength.min(10));
        out.push_str(&format!(
            "  {:<20} {}{} {}/10\n",
            sector.name,
            "█".repeat(filled),
            "░".repeat(10 - filled),
            sector.strength
        ));
    }
    out
}

/// Render one actionable setup card
pub fn stock_card(stock: &StockRecommendation) -> String {
    let recommendation = stock
        .recommendation
        .map_or("??".to_string(), |r| format!("{r:?}").to_uppercase());

    let mut out = String::new();
    out.push_str(&format!(
        "── {} [{}] ─ {:?}/{:?} ──\n",
        stock.symbol, recommendation, stock.trade_horizon, stock.setup_type
    ));
    out.push_str(&format!("   {}\n", stock.company_name));
    out.push_str(&format!(
        "   Price {}  Entry {}  Target {}  Stop {}\n",
        stock.current_price, stock.entry_range, stock.target_price, stock.stop_loss
    ));
    out.push_str(&format!(
        "   Sector: {} ({})  Volume: {}\n",
        stock.sector, stock.sector_sentiment, stock.volume_analysis
    ));
    if !stock.news_summary.is_empty() {
        out.push_str(&format!(
            "   News [{:?}]: {}\n",
            stock.news_impact, stock.news_summary
        ));
    }
    out.push_str(&format!("   Analysis: {}\n", stock.reasoning));
    out
}

/// Render the no-setups placeholder
pub fn no_setups() -> String {
    "No high-probability setups found right now.\n\
     The market might be choppy or sideways.\n"
        .to_string()
}

/// Render the grounding source list
pub fn sources(analysis: &MarketAnalysis) -> String {
    if analysis.source_urls.is_empty() {
        return String::new();
    }

    let mut out = String::from("Live Data Sources:\n");
    for source in &analysis.source_urls {
        out.push_str(&format!("  - {} <{}>\n", source.title, source.uri));
    }
    out
}

/// Render one live price line; the feed is fabricated and says so
pub fn live_price(symbol: &str, price: f64, direction: PriceDirection) -> String {
    let arrow = match direction {
        PriceDirection::Up => "▲",
        PriceDirection::Down => "▼",
        PriceDirection::Flat => "·",
    };
    format!("{symbol:<12} {price:>10.2} {arrow}  (simulated feed)")
}

/// Render one toast notification line
pub fn toast_line(toast: &Toast) -> String {
    let marker = match toast.kind {
        ToastKind::Success => "🔔",
        ToastKind::Danger => "⚠️",
    };
    format!("{marker} {}", toast.message)
}

/// Render the single failure banner; no partial results accompany it
pub fn scan_failed(error: &anyhow::Error) -> String {
    format!("❌ Scan Failed: {error}")
}
