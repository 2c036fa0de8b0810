//! Cancellable narrative timers.
//!
//! Every phase change advances the clock's epoch. A timer carries the token
//! that was current when it was scheduled; once the phase moves on, that token
//! no longer matches and firing it does nothing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseToken(u64);

impl PhaseToken {
    pub fn epoch(self) -> u64 {
        self.0
    }
}

/// A delayed phase advance waiting to be fired with its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub token: PhaseToken,
    pub delay: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PhaseClock {
    epoch: u64,
}

impl PhaseClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to a new epoch, invalidating every token handed out so far.
    pub fn advance(&mut self) -> PhaseToken {
        self.epoch += 1;
        PhaseToken(self.epoch)
    }

    pub fn current(&self) -> PhaseToken {
        PhaseToken(self.epoch)
    }

    pub fn is_current(&self, token: PhaseToken) -> bool {
        token.0 == self.epoch
    }

    /// A transition for the current epoch.
    pub fn schedule(&self, delay: Duration) -> ScheduledTransition {
        ScheduledTransition {
            token: self.current(),
            delay,
        }
    }
}
