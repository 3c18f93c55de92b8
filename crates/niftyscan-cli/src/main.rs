//! niftyscan - grounded AI market scanner for NSE indices
//!
//! Scans the selected index through a web-grounded Gemini completion,
//! normalizes the returned JSON into typed setup cards, and optionally
//! runs a clearly-labeled simulated live ticker with one-shot
//! target/stop-loss alerts.

mod render;
mod scan;

use clap::{Parser, ValueEnum};
use niftyscan_core::MarketIndex;
use niftyscan_engine::{TickerSettings, WatchSession};
use niftyscan_llm::providers::GeminiProvider;
use scan::{ScanOptions, run_scan};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IndexArg {
    Nifty50,
    BankNifty,
    Nifty500,
}

impl From<IndexArg> for MarketIndex {
    fn from(arg: IndexArg) -> Self {
        match arg {
            IndexArg::Nifty50 => MarketIndex::Nifty50,
            IndexArg::BankNifty => MarketIndex::BankNifty,
            IndexArg::Nifty500 => MarketIndex::Nifty500,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "niftyscan")]
#[command(about = "AI market scanner for NSE indices with a simulated live ticker", long_about = None)]
struct Args {
    /// Index to scan
    #[arg(short, long, value_enum, default_value = "nifty50")]
    index: IndexArg,

    /// Completion model identifier
    #[arg(long, default_value = "gemini-2.5-flash")]
    model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 0.2)]
    temperature: f32,

    /// Run the simulated ticker for this many seconds after the scan
    #[arg(long)]
    watch: Option<u64>,

    /// Arm every target and stop-loss alert at watch start
    #[arg(long)]
    arm_alerts: bool,

    /// Simulation tick cadence in seconds
    #[arg(long, default_value_t = 5)]
    tick_secs: u64,
}

/// Initialize tracing subscriber with default configuration
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let index = MarketIndex::from(args.index);

    let provider = match GeminiProvider::from_env() {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("{}", render::scan_failed(&e.into()));
            std::process::exit(1);
        }
    };

    let options = ScanOptions {
        model: args.model,
        temperature: args.temperature,
    };

    // Scans are sequential: one outstanding request at a time, and a
    // failed scan requires an explicit re-run. On failure nothing else is
    // shown - no-data, not a half-populated card grid.
    let analysis = match run_scan(&provider, index, &options).await {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{}", render::scan_failed(&e));
            std::process::exit(1);
        }
    };

    println!("{}", render::overview(&analysis));
    if analysis.stocks.is_empty() {
        println!("{}", render::no_setups());
    } else {
        for stock in &analysis.stocks {
            println!("{}", render::stock_card(stock));
        }
    }
    print!("{}", render::sources(&analysis));

    if let Some(watch_secs) = args.watch {
        watch_loop(&analysis, watch_secs, args.arm_alerts, args.tick_secs).await;
    }

    Ok(())
}

/// Drive the simulated ticker session for a fixed duration
async fn watch_loop(
    analysis: &niftyscan_core::MarketAnalysis,
    watch_secs: u64,
    arm_alerts: bool,
    tick_secs: u64,
) {
    let settings = TickerSettings {
        tick_interval: Duration::from_secs(tick_secs.max(1)),
        ..TickerSettings::default()
    };

    let mut session = WatchSession::start(analysis, &settings);
    if arm_alerts {
        session.arm_all();
        info!("All target and stop-loss alerts armed");
    }

    println!("\nLive simulation for {watch_secs}s (prices are fabricated):");

    let mut refresh = tokio::time::interval(Duration::from_secs(1));
    let deadline = tokio::time::Instant::now() + Duration::from_secs(watch_secs);

    while tokio::time::Instant::now() < deadline {
        refresh.tick().await;

        for id in session.drain() {
            if let Some(toast) = session.toasts().active().iter().find(|t| t.id == id) {
                println!("{}", render::toast_line(toast));
            }
        }
        session.sweep();

        for (symbol, price, direction) in session.prices() {
            println!("{}", render::live_price(&symbol, price, direction));
        }
    }

    // Deterministic teardown: no timer survives the session
    session.shutdown();
}
