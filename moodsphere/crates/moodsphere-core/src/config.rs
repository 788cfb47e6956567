use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enhanced::DEFAULT_RHYTHM_WINDOW;
use crate::error::ConfigError;
use crate::phase::PhaseConfig;
use crate::timeline::DEFAULT_TIMELINE_CAPACITY;

pub const DEFAULT_TIMELINE_DISPLAY: usize = 8;
pub const DEFAULT_JITTER_VARIANCE: f32 = 20.0;

/// Tunables for a [`crate::session::MoodSession`]. Missing JSON fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub phase: PhaseConfig,
    pub rhythm_window: usize,
    pub timeline_capacity: usize,
    pub timeline_display: usize,
    pub jitter_variance: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            phase: PhaseConfig::default(),
            rhythm_window: DEFAULT_RHYTHM_WINDOW,
            timeline_capacity: DEFAULT_TIMELINE_CAPACITY,
            timeline_display: DEFAULT_TIMELINE_DISPLAY,
            jitter_variance: DEFAULT_JITTER_VARIANCE,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.phase.validate()?;
        if self.rhythm_window == 0 {
            return Err(ConfigError::Zero("rhythm_window"));
        }
        if self.timeline_capacity == 0 {
            return Err(ConfigError::Zero("timeline_capacity"));
        }
        if self.timeline_display == 0 {
            return Err(ConfigError::Zero("timeline_display"));
        }
        if !(self.jitter_variance >= 0.0) {
            return Err(ConfigError::Negative {
                name: "jitter_variance",
                value: self.jitter_variance,
            });
        }
        Ok(())
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SessionConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        SessionConfig::from_json_str(&raw)
    }
}
