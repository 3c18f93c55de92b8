//! Per-instrument ticker state machine
//!
//! Pure state: the timer and the random draw live in [`crate::task`], so
//! everything here is testable by forcing prices directly.

use crate::alert::{AlertEvent, AlertKind, AlertSwitch};
use niftyscan_core::{StockRecommendation, extract_price};

/// Max per-tick fluctuation fraction (0.15% peak-to-peak)
pub const VOLATILITY: f64 = 0.0015;

/// Which side of the trade the setup plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    /// Explicit BUY recommendation
    Long,
    /// Everything else (SELL, HOLD, AVOID, or no recommendation at all)
    Short,
}

/// Display-only movement marker for the last tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceDirection {
    Up,
    Down,
    #[default]
    Flat,
}

/// Static parameters of one instrument's simulation
#[derive(Debug, Clone)]
pub struct TickerSpec {
    pub symbol: String,
    pub side: TradeSide,
    pub start_price: f64,
    pub target: f64,
    pub stop: f64,
}

impl TickerSpec {
    /// Derive simulation parameters from a normalized setup
    ///
    /// Display strings without a parseable numeral degrade to a price of
    /// 0.0; the engine keeps running rather than failing.
    pub fn from_stock(stock: &StockRecommendation) -> Self {
        Self {
            symbol: stock.symbol.clone(),
            side: if stock.is_buy() {
                TradeSide::Long
            } else {
                TradeSide::Short
            },
            start_price: extract_price(&stock.current_price),
            target: extract_price(&stock.target_price),
            stop: extract_price(&stock.stop_loss),
        }
    }
}

/// Live simulation state for one instrument
///
/// Lives exactly as long as its card: created when the card is rendered,
/// dropped (with its timer) when the card is unmounted or a new analysis
/// replaces the result set.
#[derive(Debug, Clone)]
pub struct Ticker {
    spec: TickerSpec,
    live_price: f64,
    direction: PriceDirection,
    target_switch: AlertSwitch,
    stop_switch: AlertSwitch,
}

impl Ticker {
    /// Create a ticker with both switches disarmed
    pub fn new(spec: TickerSpec) -> Self {
        Self {
            live_price: spec.start_price,
            spec,
            direction: PriceDirection::Flat,
            target_switch: AlertSwitch::new(),
            stop_switch: AlertSwitch::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.spec.symbol
    }

    pub fn live_price(&self) -> f64 {
        self.live_price
    }

    pub fn direction(&self) -> PriceDirection {
        self.direction
    }

    pub fn target_armed(&self) -> bool {
        self.target_switch.is_armed()
    }

    pub fn stop_armed(&self) -> bool {
        self.stop_switch.is_armed()
    }

    /// Arm or disarm the target-hit watch
    pub fn toggle_target(&mut self) {
        self.target_switch.toggle();
    }

    /// Arm or disarm the stop-loss watch
    pub fn toggle_stop(&mut self) {
        self.stop_switch.toggle();
    }

    /// Advance one simulation tick with a uniform draw in [0, 1)
    ///
    /// The next price is `prev * (1 + VOLATILITY * (unit - 0.5))`.
    pub fn step(&mut self, unit: f64) -> Vec<AlertEvent> {
        let next = self.live_price * (1.0 + VOLATILITY * (unit - 0.5));
        self.apply_price(next)
    }

    /// Force the next price, evaluating direction and crossings
    ///
    /// Target is checked before stop-loss; when thresholds are
    /// pathologically close both may fire on the same tick, and both
    /// events are emitted independently.
    pub fn apply_price(&mut self, next: f64) -> Vec<AlertEvent> {
        self.direction = if next > self.live_price {
            PriceDirection::Up
        } else if next < self.live_price {
            PriceDirection::Down
        } else {
            PriceDirection::Flat
        };
        self.live_price = next;

        let mut events = Vec::new();

        if self.target_crossed(next) && self.target_switch.fire() {
            events.push(AlertEvent {
                symbol: self.spec.symbol.clone(),
                kind: AlertKind::Target,
                price: next,
            });
        }

        if self.stop_crossed(next) && self.stop_switch.fire() {
            events.push(AlertEvent {
                symbol: self.spec.symbol.clone(),
                kind: AlertKind::StopLoss,
                price: next,
            });
        }

        events
    }

    fn target_crossed(&self, price: f64) -> bool {
        match self.spec.side {
            TradeSide::Long => price >= self.spec.target,
            TradeSide::Short => price <= self.spec.target,
        }
    }

    fn stop_crossed(&self, price: f64) -> bool {
        match self.spec.side {
            TradeSide::Long => price <= self.spec.stop,
            TradeSide::Short => price >= self.spec.stop,
        }
    }
}
