//! Tuning and layout settings
//!
//! Loaded from a JSON file. Any field left out keeps its default, and a file
//! that can't be read or parsed falls back to defaults entirely.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BALL_RADIUS_DP, HEADER_FRACTION};
use crate::sim::PhysicsConstants;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics tuning
    pub physics: PhysicsConstants,

    // === Layout ===
    /// Ball radius in density-independent pixels
    pub ball_radius_dp: f32,
    /// Physical pixels per dp
    pub density: f32,
    /// Share of the screen height used by the score header (0.0 - 1.0)
    pub header_fraction: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsConstants::default(),
            ball_radius_dp: BALL_RADIUS_DP,
            density: 1.0,
            header_fraction: HEADER_FRACTION,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Field size (pixels) for a screen, below the score header
    pub fn field_size(&self, screen_width: f32, screen_height: f32) -> (f32, f32) {
        let header = self.header_fraction.clamp(0.0, 1.0);
        (screen_width, screen_height * (1.0 - header))
    }

    /// Ball radius in physical pixels
    pub fn ball_radius_px(&self) -> f32 {
        crate::dp_to_px(self.ball_radius_dp, self.density)
    }
}
