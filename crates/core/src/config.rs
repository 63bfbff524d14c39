//! Runtime configuration
//!
//! Defaults can be overridden through environment variables:
//!
//! - `BLOCKFALL_SEED`: RNG seed for the first game (default: 1)
//! - `BLOCKFALL_BASE_TICK_MS`: fall interval at level 1 (default: 500)
//!
//! Unparseable values fall back to the default.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::BASE_TICK_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: u32,
    pub base_tick_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            base_tick_ms: BASE_TICK_MS,
        }
    }
}

impl GameConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let base_tick_ms = lookup("BLOCKFALL_BASE_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.base_tick_ms);

        Self { seed, base_tick_ms }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_tick_ms == 0 {
            return Err(ConfigError::Zero {
                key: "base_tick_ms",
            });
        }
        Ok(())
    }
}
