//! Runner configuration, read from `BLOCKFALL_*` environment variables.
//!
//! Unset or unparsable values fall back to the defaults.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::SessionConfig;
use crate::types::{BASE_FALL_MS, LOCK_DELAY_MS, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed for the first session. Restarts derive theirs from it.
    pub seed: u64,
    pub lock_delay_ms: u32,
    pub base_fall_ms: u32,
    /// Fixed timestep of the game loop
    pub tick_ms: u32,
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let seed = parsed("BLOCKFALL_SEED").unwrap_or_else(clock_seed);
        let lock_delay_ms = parsed("BLOCKFALL_LOCK_DELAY_MS")
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(LOCK_DELAY_MS);
        let base_fall_ms = parsed("BLOCKFALL_BASE_FALL_MS")
            .and_then(|v| u32::try_from(v).ok())
            .filter(|&v| v > 0)
            .unwrap_or(BASE_FALL_MS);
        let tick_ms = parsed("BLOCKFALL_TICK_MS")
            .and_then(|v| u32::try_from(v).ok())
            .filter(|&v| v > 0)
            .unwrap_or(TICK_MS);

        Self {
            seed,
            lock_delay_ms,
            base_fall_ms,
            tick_ms,
        }
    }

    /// Session settings for the `generation`-th game of this run.
    pub fn session_config(&self, generation: u64) -> SessionConfig {
        SessionConfig {
            seed: self.seed.wrapping_add(generation),
            lock_delay_ms: self.lock_delay_ms,
            base_fall_ms: self.base_fall_ms,
            ..SessionConfig::default()
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
