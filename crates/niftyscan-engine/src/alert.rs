//! Armable one-shot alert switches
//!
//! The fire-once-then-require-re-arm behavior is a small explicit state
//! machine rather than a boolean with ad hoc reset logic, so the one-shot
//! invariant is structurally obvious and testable without any timer.

/// Which threshold an alert watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Target,
    StopLoss,
}

/// State of one alert switch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SwitchState {
    /// Not watching; the user has not opted in (or the switch already fired)
    #[default]
    Disarmed,
    /// Watching; the next crossing fires exactly once
    Armed,
}

/// A user-armable watch on a price threshold
///
/// Toggling is the only external input. Firing auto-resets to
/// [`SwitchState::Disarmed`], so an alert cannot repeat until the user
/// re-arms it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertSwitch {
    state: SwitchState,
}

impl AlertSwitch {
    /// Create a disarmed switch
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip between armed and disarmed, returning the new state
    pub fn toggle(&mut self) -> SwitchState {
        self.state = match self.state {
            SwitchState::Disarmed => SwitchState::Armed,
            SwitchState::Armed => SwitchState::Disarmed,
        };
        self.state
    }

    /// Whether the switch is currently armed
    pub fn is_armed(&self) -> bool {
        self.state == SwitchState::Armed
    }

    /// Consume a crossing: returns true only when the switch was armed,
    /// and always leaves it disarmed
    pub fn fire(&mut self) -> bool {
        let was_armed = self.is_armed();
        self.state = SwitchState::Disarmed;
        was_armed
    }
}

/// A fired alert, emitted upward to the notification relay
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub symbol: String,
    pub kind: AlertKind,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_disarmed() {
        let switch = AlertSwitch::new();
        assert!(!switch.is_armed());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut switch = AlertSwitch::new();
        assert_eq!(switch.toggle(), SwitchState::Armed);
        assert_eq!(switch.toggle(), SwitchState::Disarmed);
    }

    #[test]
    fn test_fire_is_one_shot() {
        let mut switch = AlertSwitch::new();
        switch.toggle();

        assert!(switch.fire());
        // Second crossing without re-arm stays quiet
        assert!(!switch.fire());

        switch.toggle();
        assert!(switch.fire());
    }

    #[test]
    fn test_fire_while_disarmed_is_noop() {
        let mut switch = AlertSwitch::new();
        assert!(!switch.fire());
        assert!(!switch.is_armed());
    }
}
