//! Data-driven game balance
//!
//! Every field defaults to the value in `consts`. Overrides are JSON objects
//! with any subset of fields, read from the canvas `data-tuning` attribute or
//! LocalStorage on the web, or from a file named by `JELLYFISH_DASH_TUNING`
//! on native.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: f32,
    /// Pixels per tick while a direction key is held
    pub player_speed: f32,
    pub starting_lives: u32,

    // === Scoring ===
    pub hit_penalty: u32,
    pub jellyfish_reward: u32,

    // === Black hole ===
    pub black_hole_radius: f32,
    pub black_hole_speed: (f32, f32),
    pub gravity_range_scale: f32,
    pub gravity_strength: f32,
    pub gravity_min_distance: f32,

    // === Jellyfish ===
    pub jellyfish_count: usize,
    pub jellyfish_size: f32,
    pub jellyfish_speed: (f32, f32),

    // === Drift ===
    pub wobble_amplitude: (f32, f32),
    pub wobble_frequency: (f32, f32),
    pub retarget_ticks: (u32, u32),

    // === Timed states ===
    pub flash_interval_ticks: u32,
    pub flash_toggles: u32,
    pub game_over_interval_ticks: u32,
    pub game_over_toggles: u32,

    // === Touch ===
    pub touch_sensitivity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,

            hit_penalty: HIT_PENALTY,
            jellyfish_reward: JELLYFISH_REWARD,

            black_hole_radius: BLACK_HOLE_RADIUS,
            black_hole_speed: (BLACK_HOLE_MIN_SPEED, BLACK_HOLE_MAX_SPEED),
            gravity_range_scale: GRAVITY_RANGE_SCALE,
            gravity_strength: GRAVITY_STRENGTH,
            gravity_min_distance: GRAVITY_MIN_DISTANCE,

            jellyfish_count: JELLYFISH_COUNT,
            jellyfish_size: JELLYFISH_SIZE,
            jellyfish_speed: (JELLYFISH_MIN_SPEED, JELLYFISH_MAX_SPEED),

            wobble_amplitude: (WOBBLE_MIN_AMPLITUDE, WOBBLE_MAX_AMPLITUDE),
            wobble_frequency: (WOBBLE_MIN_FREQUENCY, WOBBLE_MAX_FREQUENCY),
            retarget_ticks: (RETARGET_MIN_TICKS, RETARGET_MAX_TICKS),

            flash_interval_ticks: FLASH_INTERVAL_TICKS,
            flash_toggles: FLASH_TOGGLES,
            game_over_interval_ticks: GAME_OVER_INTERVAL_TICKS,
            game_over_toggles: GAME_OVER_TOGGLES,

            touch_sensitivity: TOUCH_SENSITIVITY,
        }
    }
}

/// Order a range and clamp its lower end
fn ordered<T: PartialOrd + Copy>(range: (T, T), min: T) -> (T, T) {
    let lo = if range.0 < min { min } else { range.0 };
    let hi = if range.1 < lo { lo } else { range.1 };
    (lo, hi)
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "jellyfish_dash_tuning";

    /// Environment variable naming a JSON override file (native only)
    #[allow(dead_code)]
    const ENV_VAR: &'static str = "JELLYFISH_DASH_TUNING";

    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        self.player_size = self.player_size.clamp(1.0, CANVAS_HEIGHT.min(CANVAS_WIDTH) / 2.0);
        self.player_speed = self.player_speed.max(0.0);
        self.starting_lives = self.starting_lives.max(1);

        self.black_hole_radius = self.black_hole_radius.clamp(1.0, CANVAS_HEIGHT / 4.0);
        self.black_hole_speed = ordered(self.black_hole_speed, 0.0);
        self.gravity_range_scale = self.gravity_range_scale.max(1.0);
        self.gravity_strength = self.gravity_strength.max(0.0);
        self.gravity_min_distance = self.gravity_min_distance.max(f32::EPSILON);

        self.jellyfish_count = self.jellyfish_count.min(JELLYFISH_MAX_COUNT);
        self.jellyfish_size = self.jellyfish_size.clamp(1.0, CANVAS_HEIGHT / 4.0);
        self.jellyfish_speed = ordered(self.jellyfish_speed, 0.0);

        self.wobble_amplitude = ordered(self.wobble_amplitude, 0.0);
        self.wobble_frequency = ordered(self.wobble_frequency, 0.0);
        self.retarget_ticks = ordered(self.retarget_ticks, 1);

        self.flash_interval_ticks = self.flash_interval_ticks.max(1);
        self.flash_toggles = self.flash_toggles.max(1);
        self.game_over_interval_ticks = self.game_over_interval_ticks.max(1);
        self.game_over_toggles = self.game_over_toggles.max(1);

        self.touch_sensitivity = self.touch_sensitivity.max(0.0);
        self
    }

    /// Reach of the black hole's pull
    pub fn gravity_reach(&self) -> f32 {
        self.black_hole_radius * self.gravity_range_scale
    }

    /// Load tuning from the canvas attribute or LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas_attr: Option<String>) -> Self {
        let stored = || {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
        };

        if let Some(json) = canvas_attr.or_else(stored) {
            match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring tuning overrides: {}", e),
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Load tuning from the file named by the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            return Self::default();
        };
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| GameError::InvalidTuning(format!("{}: {}", path, e)))
            .and_then(|json| Self::from_json(&json));
        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Self::default()
            }
        }
    }
}
