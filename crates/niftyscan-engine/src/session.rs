//! Watch session: tickers plus toasts for one analysis
//!
//! A session owns every per-card timer and the toast store for the
//! currently displayed analysis. A new scan replaces the session
//! wholesale; dropping the old one cancels all of its timers.

use crate::alert::AlertEvent;
use crate::notify::{DEFAULT_TOAST_TTL, ToastStore, toast_for};
use crate::task::{TickerCommand, TickerHandle, spawn};
use crate::ticker::{Ticker, TickerSpec};
use niftyscan_core::MarketAnalysis;
use std::time::Duration;
use tokio::sync::mpsc;

/// Tunables for one watch session
#[derive(Debug, Clone)]
pub struct TickerSettings {
    /// Simulation tick cadence
    pub tick_interval: Duration,
    /// Toast lifetime
    pub toast_ttl: Duration,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            // The reference cadence: one walk step every five seconds
            tick_interval: Duration::from_secs(5),
            toast_ttl: DEFAULT_TOAST_TTL,
        }
    }
}

/// Owned state for one displayed result set
pub struct WatchSession {
    handles: Vec<TickerHandle>,
    events: mpsc::UnboundedReceiver<AlertEvent>,
    toasts: ToastStore,
}

impl WatchSession {
    /// Spawn one independent ticker per stock in the analysis
    ///
    /// All switches start disarmed; arming is an explicit user action.
    pub fn start(analysis: &MarketAnalysis, settings: &TickerSettings) -> Self {
        let (events_tx, events) = mpsc::unbounded_channel();

        let handles = analysis
            .stocks
            .iter()
            .map(|stock| {
                let ticker = Ticker::new(TickerSpec::from_stock(stock));
                spawn(ticker, settings.tick_interval, events_tx.clone())
            })
            .collect();

        Self {
            handles,
            events,
            toasts: ToastStore::new(settings.toast_ttl),
        }
    }

    /// Number of running tickers
    pub fn ticker_count(&self) -> usize {
        self.handles.len()
    }

    /// Toggle the target watch for one symbol
    pub fn toggle_target(&self, symbol: &str) {
        self.command(symbol, TickerCommand::ToggleTarget);
    }

    /// Toggle the stop-loss watch for one symbol
    pub fn toggle_stop(&self, symbol: &str) {
        self.command(symbol, TickerCommand::ToggleStop);
    }

    /// Arm every switch in the session (switches start disarmed, so one
    /// toggle arms them)
    pub fn arm_all(&self) {
        for handle in &self.handles {
            handle.send(TickerCommand::ToggleTarget);
            handle.send(TickerCommand::ToggleStop);
        }
    }

    fn command(&self, symbol: &str, command: TickerCommand) {
        for handle in self.handles.iter().filter(|h| h.symbol() == symbol) {
            handle.send(command);
        }
    }

    /// Latest simulated price per instrument, in card order
    pub fn prices(&self) -> Vec<(String, f64, crate::ticker::PriceDirection)> {
        self.handles
            .iter()
            .map(|handle| {
                let (price, direction) = handle.live_price();
                (handle.symbol().to_string(), price, direction)
            })
            .collect()
    }

    /// Pump pending alert events into toasts, returning the new toast ids
    pub fn drain(&mut self) -> Vec<u64> {
        let mut created = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            let (message, kind) = toast_for(&event);
            created.push(self.toasts.push(message, kind));
        }
        created
    }

    /// Expire old toasts
    pub fn sweep(&mut self) {
        self.toasts.sweep();
    }

    /// Currently visible toasts
    pub fn toasts(&self) -> &ToastStore {
        &self.toasts
    }

    /// Dismiss one toast by id
    pub fn dismiss(&mut self, id: u64) -> bool {
        self.toasts.dismiss(id)
    }

    /// Cancel every timer
    pub fn shutdown(self) {
        for handle in self.handles {
            handle.stop();
        }
    }
}
