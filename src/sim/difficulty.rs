//! Difficulty scaling
//!
//! The speed multiplier grows by a fixed step on a fixed cadence of survival
//! time. Only enemies spawned afterwards pick up the new speed.

use serde::{Deserialize, Serialize};

/// Speed multiplier plus the time accumulated toward the next increase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub multiplier: f32,
    pub since_increase_ms: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            since_increase_ms: 0.0,
        }
    }
}

impl Difficulty {
    /// Advance by `dt_ms`. Returns the new multiplier when it increased.
    ///
    /// The interval is subtracted rather than reset so the cadence does not
    /// drift when ticks don't divide the interval evenly.
    pub fn advance(&mut self, dt_ms: f64, interval_ms: f64, increment: f32) -> Option<f32> {
        if interval_ms <= 0.0 {
            return None;
        }
        self.since_increase_ms += dt_ms;
        if self.since_increase_ms >= interval_ms {
            self.since_increase_ms -= interval_ms;
            self.multiplier += increment;
            return Some(self.multiplier);
        }
        None
    }
}
