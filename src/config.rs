//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Parameters of one simulation run
///
/// A sequence generated under one config is meaningless under another, so
/// any change means regenerating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Pixels per cell, only meaningful to renderers
    pub cell_size: u32,
    /// Number of generations simulated past the message
    pub generation_count: usize,
    /// Delay between two playback steps
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 150,
            height: 100,
            cell_size: 8,
            generation_count: 10,
            frame_interval_ms: 100,
        }
    }
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(Error::InvalidConfig("width must be positive"));
        }
        if self.height == 0 {
            return Err(Error::InvalidConfig("height must be positive"));
        }
        if self.cell_size == 0 {
            return Err(Error::InvalidConfig("cell size must be positive"));
        }
        if self.frame_interval_ms == 0 {
            return Err(Error::InvalidConfig("frame interval must be positive"));
        }
        Ok(())
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Returns this config with every field present in `update` replaced
    pub fn merged(mut self, update: &ConfigUpdate) -> Self {
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(cell_size) = update.cell_size {
            self.cell_size = cell_size;
        }
        if let Some(generation_count) = update.generation_count {
            self.generation_count = generation_count;
        }
        if let Some(frame_interval_ms) = update.frame_interval_ms {
            self.frame_interval_ms = frame_interval_ms;
        }
        self
    }

    /// Merges `update` in place, leaving `self` untouched if the result is invalid
    pub fn apply(&mut self, update: &ConfigUpdate) -> Result<()> {
        let merged = self.merged(update);
        if let Err(err) = merged.validate() {
            warn!(?update, %err, "rejected config update");
            return Err(err);
        }
        *self = merged;
        Ok(())
    }
}

/// A partial [`Config`]; absent fields keep their current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub cell_size: Option<u32>,
    pub generation_count: Option<usize>,
    pub frame_interval_ms: Option<u64>,
}
