//! Session lifecycle
//!
//! One-directional: a session is brought up once and then stays ready.

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Nothing sent to the panel yet
    #[default]
    Uninitialized,
    /// Reset pulsed, bring-up commands in flight
    Initializing,
    /// Bring-up finished, buffer may be flushed
    Ready,
}

/// Lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionEvent {
    /// Bring-up started
    Begin,
    /// Bring-up sequence finished
    Complete,
}

impl SessionState {
    /// Whether device operations outside bring-up are allowed
    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }

    /// Apply an event, returning `None` when it is not valid here
    pub fn transition(self, event: SessionEvent) -> Option<Self> {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Uninitialized, Begin) => Some(Initializing),
            (Initializing, Complete) => Some(Ready),
            _ => None,
        }
    }
}
