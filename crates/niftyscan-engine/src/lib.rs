//! Simulated ticker and one-shot price alert engine
//!
//! Each rendered stock setup gets its own independent engine instance: a
//! periodic randomized price walk over the setup's parsed starting price,
//! two armable alert switches (target-hit, stop-loss-hit), and crossing
//! checks that respect the trade's direction. Firing is one-shot: a switch
//! disarms itself when it fires and stays quiet until the user re-arms it.
//!
//! The walk is display flavor, not a market model. Prices are fabricated
//! locally with a small uniform jitter and every consumer is expected to
//! label them as simulated.
//!
//! Layering:
//! - [`Ticker`] — the pure per-instrument state machine, timer-free and
//!   unit-testable with forced prices
//! - [`task`] — one tokio timer task per instrument driving a [`Ticker`],
//!   cancelled deterministically when its card goes away
//! - [`notify`] — the session-scoped toast relay consuming [`AlertEvent`]s
//! - [`WatchSession`] — owns the tickers and the relay for one analysis,
//!   replaced wholesale when a new scan lands

pub mod alert;
pub mod notify;
pub mod session;
pub mod task;
pub mod ticker;

pub use alert::{AlertEvent, AlertKind, AlertSwitch, SwitchState};
pub use notify::{Toast, ToastKind, ToastStore, toast_for};
pub use session::{TickerSettings, WatchSession};
pub use task::{TickerCommand, TickerHandle, spawn};
pub use ticker::{PriceDirection, Ticker, TickerSpec, TradeSide, VOLATILITY};
