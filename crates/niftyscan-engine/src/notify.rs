//! Toast notification relay
//!
//! Converts alert events from any number of running tickers into
//! transient, auto-expiring notifications. The store is session-scoped
//! state owned by whoever renders it, not a process-wide singleton, and
//! ids come from a strictly increasing counter rather than wall-clock
//! time so rapid firing cannot collide.

use crate::alert::{AlertEvent, AlertKind};
use std::time::{Duration, Instant};

/// Visual flavor of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Target hit
    Success,
    /// Stop loss hit
    Danger,
}

/// One transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
}

/// Default lifetime of a toast
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(5);

/// Session-scoped store of live notifications
#[derive(Debug)]
pub struct ToastStore {
    next_id: u64,
    ttl: Duration,
    toasts: Vec<Toast>,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastStore {
    /// Create a store whose entries expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            next_id: 0,
            ttl,
            toasts: Vec::new(),
        }
    }

    /// Add a notification, returning its unique id
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            created_at: Instant::now(),
        });
        id
    }

    /// Manually dismiss one notification; closing one can never remove
    /// another since ids are unique
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Drop entries older than the TTL
    pub fn sweep(&mut self) {
        let ttl = self.ttl;
        self.toasts
            .retain(|toast| toast.created_at.elapsed() < ttl);
    }

    /// Currently visible notifications, oldest first
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Map a fired alert to its notification message and flavor
pub fn toast_for(event: &AlertEvent) -> (String, ToastKind) {
    match event.kind {
        AlertKind::Target => (
            format!("{} hit Target Price at {:.2}!", event.symbol, event.price),
            ToastKind::Success,
        ),
        AlertKind::StopLoss => (
            format!("{} hit Stop Loss at {:.2}!", event.symbol, event.price),
            ToastKind::Danger,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_unique_under_rapid_push() {
        let mut store = ToastStore::default();
        let ids: Vec<u64> = (0..100)
            .map(|_| store.push("x", ToastKind::Success))
            .collect();

        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_dismiss_removes_only_the_target() {
        let mut store = ToastStore::default();
        let first = store.push("first", ToastKind::Success);
        let second = store.push("second", ToastKind::Danger);

        assert!(store.dismiss(first));
        assert_eq!(store.active().len(), 1);
        assert_eq!(store.active()[0].id, second);

        assert!(!store.dismiss(first));
    }

    #[test]
    fn test_sweep_expires_old_entries() {
        let mut store = ToastStore::new(Duration::ZERO);
        store.push("gone", ToastKind::Success);
        store.sweep();
        assert!(store.active().is_empty());

        let mut store = ToastStore::new(Duration::from_secs(60));
        store.push("kept", ToastKind::Success);
        store.sweep();
        assert_eq!(store.active().len(), 1);
    }

    #[test]
    fn test_toast_messages() {
        use crate::alert::AlertEvent;

        let (message, kind) = toast_for(&AlertEvent {
            symbol: "SBIN".to_string(),
            kind: AlertKind::Target,
            price: 830.456,
        });
        assert_eq!(message, "SBIN hit Target Price at 830.46!");
        assert_eq!(kind, ToastKind::Success);

        let (message, kind) = toast_for(&AlertEvent {
            symbol: "SBIN".to_string(),
            kind: AlertKind::StopLoss,
            price: 804.0,
        });
        assert_eq!(message, "SBIN hit Stop Loss at 804.00!");
        assert_eq!(kind, ToastKind::Danger);
    }
}
