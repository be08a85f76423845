//! Session configuration, loaded from JSON.
//!
//! Every field is optional in the file; missing fields take the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use trek_core::constants::*;
use trek_core::enums::CollectProgress;
use trek_missions::MissionConfig;

use crate::placement::Placement;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for starting a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub coin_count: u32,
    pub inner_radius: f64,
    pub spread_radius: f64,
    pub float_height: f64,
    pub collection_radius: f64,
    /// RNG seed for coin placement. `None` draws from OS entropy, so every
    /// session lays the ring out differently.
    pub seed: Option<u64>,
    pub collect_progress: CollectProgress,
    pub mission_advance_delay_ms: u64,
    /// Fixed-step rate used by the driver loop, in ticks per second.
    pub tick_rate: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            coin_count: COIN_COUNT,
            inner_radius: COIN_INNER_RADIUS,
            spread_radius: COIN_SPREAD_RADIUS,
            float_height: COIN_FLOAT_HEIGHT,
            collection_radius: COLLECTION_RADIUS,
            seed: None,
            collect_progress: CollectProgress::default(),
            mission_advance_delay_ms: MISSION_ADVANCE_DELAY_MS,
            tick_rate: TICK_RATE,
        }
    }
}

impl SessionConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }
        if !(self.collection_radius.is_finite() && self.collection_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "collection_radius must be positive, got {}",
                self.collection_radius
            )));
        }
        for (name, value) in [
            ("inner_radius", self.inner_radius),
            ("spread_radius", self.spread_radius),
            ("float_height", self.float_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn placement(&self) -> Placement {
        Placement {
            count: self.coin_count,
            inner_radius: self.inner_radius,
            spread_radius: self.spread_radius,
            float_height: self.float_height,
        }
    }

    pub fn mission_config(&self) -> MissionConfig {
        MissionConfig {
            collect_progress: self.collect_progress,
            advance_delay_ms: self.mission_advance_delay_ms,
        }
    }

    /// Duration of one fixed step in seconds.
    pub fn tick_secs(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }
}
