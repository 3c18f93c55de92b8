//! Timer task driving one ticker
//!
//! One recurring tokio task per rendered instrument card; tasks never share
//! state and may interleave arbitrarily. Cancellation is deterministic: the
//! handle aborts its task on [`TickerHandle::stop`] and again on drop as a
//! backstop, so an unmounted card cannot leak periodic work.

use crate::alert::AlertEvent;
use crate::ticker::{PriceDirection, Ticker};
use rand::Rng;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// External inputs to a running ticker task
#[derive(Debug, Clone, Copy)]
pub enum TickerCommand {
    /// Arm or disarm the target-hit watch
    ToggleTarget,
    /// Arm or disarm the stop-loss watch
    ToggleStop,
    /// Override the next price instead of walking (diagnostics and tests)
    ForcePrice(f64),
}

/// Handle to one running ticker task
pub struct TickerHandle {
    symbol: String,
    commands: mpsc::UnboundedSender<TickerCommand>,
    price: watch::Receiver<(f64, PriceDirection)>,
    task: JoinHandle<()>,
}

impl TickerHandle {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Latest simulated price and its movement marker
    pub fn live_price(&self) -> (f64, PriceDirection) {
        *self.price.borrow()
    }

    /// Send a command to the task; ignored if the task already stopped
    pub fn send(&self, command: TickerCommand) {
        let _ = self.commands.send(command);
    }

    /// Cancel the timer
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn the timer task for one instrument
///
/// Each tick draws a uniform unit from the thread RNG, advances the walk,
/// and forwards any fired alerts over `events`. The tick handler runs to
/// completion before the next scheduled tick for the same instrument.
pub fn spawn(
    mut ticker: Ticker,
    tick_interval: Duration,
    events: mpsc::UnboundedSender<AlertEvent>,
) -> TickerHandle {
    let symbol = ticker.symbol().to_string();
    let (commands, mut command_rx) = mpsc::unbounded_channel();
    let (price_tx, price) = watch::channel((ticker.live_price(), ticker.direction()));

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick_interval);
        // The first interval tick completes immediately; skip it so the
        // card shows its starting price for one full period
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let unit = rand::thread_rng().r#gen::<f64>();
                    for event in ticker.step(unit) {
                        emit(&events, event);
                    }
                    let _ = price_tx.send((ticker.live_price(), ticker.direction()));
                }
                command = command_rx.recv() => {
                    match command {
                        Some(TickerCommand::ToggleTarget) => {
                            ticker.toggle_target();
                            debug!(symbol = %ticker.symbol(), armed = ticker.target_armed(), "Target watch toggled");
                        }
                        Some(TickerCommand::ToggleStop) => {
                            ticker.toggle_stop();
                            debug!(symbol = %ticker.symbol(), armed = ticker.stop_armed(), "Stop watch toggled");
                        }
                        Some(TickerCommand::ForcePrice(forced)) => {
                            for event in ticker.apply_price(forced) {
                                emit(&events, event);
                            }
                            let _ = price_tx.send((ticker.live_price(), ticker.direction()));
                        }
                        // All senders gone: the session was torn down
                        None => break,
                    }
                }
            }
        }
    });

    TickerHandle {
        symbol,
        commands,
        price,
        task,
    }
}

fn emit(events: &mpsc::UnboundedSender<AlertEvent>, event: AlertEvent) {
    info!(
        symbol = %event.symbol,
        kind = ?event.kind,
        price = event.price,
        "Alert fired"
    );
    let _ = events.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertKind;
    use crate::ticker::{TickerSpec, TradeSide};

    fn test_ticker() -> Ticker {
        Ticker::new(TickerSpec {
            symbol: "SBIN".to_string(),
            side: TradeSide::Long,
            start_price: 105.0,
            target: 110.0,
            stop: 100.0,
        })
    }

    #[tokio::test]
    async fn test_forced_crossing_reaches_listener_once() {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        // Long interval keeps the walk out of the way of the forced prices
        let handle = spawn(test_ticker(), Duration::from_secs(3600), events_tx);

        handle.send(TickerCommand::ToggleTarget);
        handle.send(TickerCommand::ForcePrice(110.5));
        // A second crossing while disarmed must stay silent
        handle.send(TickerCommand::ForcePrice(111.0));

        let event = events_rx.recv().await.unwrap();
        assert_eq!(event.symbol, "SBIN");
        assert_eq!(event.kind, AlertKind::Target);
        assert!((event.price - 110.5).abs() < f64::EPSILON);

        handle.stop();
        // Channel closes with the task; no second event was queued
        assert!(events_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_live_price_is_observable() {
        let (events_tx, _events_rx) = mpsc::unbounded_channel();
        let handle = spawn(test_ticker(), Duration::from_secs(3600), events_tx);

        let (price, direction) = handle.live_price();
        assert!((price - 105.0).abs() < f64::EPSILON);
        assert_eq!(direction, crate::ticker::PriceDirection::Flat);

        handle.send(TickerCommand::ForcePrice(106.0));
        for _ in 0..100 {
            if handle.live_price().0 > 105.5 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        let (price, direction) = handle.live_price();
        assert!((price - 106.0).abs() < f64::EPSILON);
        assert_eq!(direction, crate::ticker::PriceDirection::Up);

        handle.stop();
    }

    #[tokio::test]
    async fn test_stop_cancels_the_timer() {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let handle = spawn(test_ticker(), Duration::from_millis(1), events_tx);
        handle.stop();

        // Sender side is dropped by the aborted task
        assert!(events_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_drop_cancels_the_timer() {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        {
            let _handle = spawn(test_ticker(), Duration::from_millis(1), events_tx);
        }
        assert!(events_rx.recv().await.is_none());
    }
}
