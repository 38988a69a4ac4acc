//! Session tuning knobs.
//!
//! Timing here is logical: the session only ever sees the milliseconds the
//! caller hands to `Session::tick`, never a clock of its own.

use crate::types::{BASE_FALL_MS, LOCK_DELAY_MS, LOCK_RESET_LIMIT, MIN_FALL_MS, MIN_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed for the bag shuffle
    pub seed: u64,
    /// Grace period between a piece coming to rest and locking
    pub lock_delay_ms: u32,
    /// How many times a grounded piece may restart its lock timer
    pub lock_reset_limit: u8,
    /// Gravity interval at level 1
    pub base_fall_ms: u32,
    /// Gravity interval floor
    pub min_fall_ms: u32,
}

impl SessionConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Milliseconds between gravity steps on `level`.
    ///
    /// `base_fall_ms / level`, floored at `min_fall_ms`. Never increases as the
    /// level goes up.
    pub fn gravity_interval_ms(&self, level: u32) -> u32 {
        let level = level.max(MIN_LEVEL);
        (self.base_fall_ms / level).max(self.min_fall_ms).max(1)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            lock_delay_ms: LOCK_DELAY_MS,
            lock_reset_limit: LOCK_RESET_LIMIT,
            base_fall_ms: BASE_FALL_MS,
            min_fall_ms: MIN_FALL_MS,
        }
    }
}
