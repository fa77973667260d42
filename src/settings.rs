//! Session settings
//!
//! Arena size, RNG seed and balance, supplied once when a session is built.
//! Hosts may load them from a JSON document; any missing field keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use crate::sim::Arena;
use crate::tuning::Tuning;

/// Reasons a settings document is rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("arena must have positive finite size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("tuning field `{0}` is out of range")]
    InvalidTuning(&'static str),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Arena width in world units
    pub arena_width: f32,
    /// Arena height in world units
    pub arena_height: f32,
    /// Seed for asteroid placement
    pub seed: u64,
    /// Balance constants
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            seed: 0x5EED_A57E,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject arenas and tuning values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.arena_width) || !valid(self.arena_height) {
            return Err(SettingsError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if let Some(field) = self.tuning.first_invalid_field() {
            return Err(SettingsError::InvalidTuning(field));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }
}
