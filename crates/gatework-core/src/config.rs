//! Engine configuration.
//!
//! Loaded from TOML; every field has a default so partial files are fine:
//!
//! ```toml
//! max_flood_passes = 100
//! frames_per_tick = 6
//! ```

use serde::{Deserialize, Serialize};

use crate::sim::TickCadence;

/// Default safety bound on flood-fill passes per tick.
pub const DEFAULT_MAX_FLOOD_PASSES: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on flood-fill passes in one tick.
    pub max_flood_passes: u32,
    /// Host frames per simulation tick.
    pub frames_per_tick: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_flood_passes: DEFAULT_MAX_FLOOD_PASSES,
            frames_per_tick: 1,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_flood_passes == 0 {
            return Err(ConfigError::Invalid("max_flood_passes must be at least 1"));
        }
        if self.frames_per_tick == 0 {
            return Err(ConfigError::Invalid("frames_per_tick must be at least 1"));
        }
        Ok(())
    }

    pub fn cadence(&self) -> TickCadence {
        TickCadence::every(self.frames_per_tick)
    }
}
