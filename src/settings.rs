//! Simulation settings
//!
//! The web build reads them from LocalStorage, the native binary from an
//! optional JSON file.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::{BoundaryPolicy, CollisionPolicy};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of players spawned on init and on every restart
    pub players_total: u32,
    /// Player bounding box width in pixels
    pub player_width: f32,
    /// Player bounding box height in pixels
    pub player_height: f32,
    /// Upper end of the per-axis velocity range is `speed_factor - 1`
    pub speed_factor: f32,
    /// Pixels subtracted from the window size when sizing the canvas
    pub canvas_margin: u32,

    // === Rules ===
    /// How same-tick conversions see each other
    pub collision_policy: CollisionPolicy,
    /// What happens when a player crosses a wall
    pub boundary_policy: BoundaryPolicy,

    /// Fixed RNG seed (headless runs and tests only)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            players_total: PLAYERS_TOTAL,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            speed_factor: SPEED_FACTOR,
            canvas_margin: CANVAS_MARGIN,

            collision_policy: CollisionPolicy::default(),
            boundary_policy: BoundaryPolicy::default(),

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Player bounding box as a vector
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.player_width, self.player_height)
    }

    /// Reject values that cannot produce a valid population
    pub fn validate(&self) -> Result<(), SimError> {
        let size = self.player_size();
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(SimError::InvalidConfiguration(
                "player size must be positive",
            ));
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(SimError::InvalidConfiguration(
                "speed_factor must be positive",
            ));
        }
        // Velocities are drawn from [-1, speed_factor - 1); the range must not
        // collapse once rounded to f32
        if self.speed_factor - 1.0 <= -1.0 {
            return Err(SimError::InvalidConfiguration(
                "speed_factor too small to give a velocity range",
            ));
        }
        Ok(())
    }

    /// Canvas size for a given window size
    pub fn canvas_size(&self, window_width: f32, window_height: f32) -> (f32, f32) {
        let margin = self.canvas_margin as f32;
        (window_width - margin, window_height - margin)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "rps_arena_settings";

    /// Load settings from LocalStorage, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
