//! Jellyfish Dash - dodge the black hole, catch the jellyfish
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `input`: Keyboard and touch mapping to per-tick input
//! - `renderer`: Immediate-mode scene building and Canvas 2D playback
//! - `platform`: Browser glue (asset loading)
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical canvas resolution
    pub const CANVAS_WIDTH: f32 = 1000.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;

    /// Player sprite (square) and movement
    pub const PLAYER_SIZE: f32 = 120.0;
    pub const PLAYER_SPEED: f32 = 10.0; // px per tick
    pub const PLAYER_START_OFFSET_Y: f32 = 100.0;
    pub const STARTING_LIVES: u32 = 5;

    /// Scoring
    pub const HIT_PENALTY: u32 = 5;
    pub const JELLYFISH_REWARD: u32 = 5;

    /// Black hole defaults
    pub const BLACK_HOLE_RADIUS: f32 = 50.0;
    pub const BLACK_HOLE_MIN_SPEED: f32 = 1.0;
    pub const BLACK_HOLE_MAX_SPEED: f32 = 2.5;

    /// Gravity: pull reaches out to radius * GRAVITY_RANGE_SCALE
    pub const GRAVITY_RANGE_SCALE: f32 = 4.0;
    pub const GRAVITY_STRENGTH: f32 = 0.02;
    /// Below this distance the pull direction is undefined and no pull is applied
    pub const GRAVITY_MIN_DISTANCE: f32 = 1.0;

    /// Jellyfish defaults
    pub const JELLYFISH_COUNT: usize = 3;
    pub const JELLYFISH_MAX_COUNT: usize = 50;
    pub const JELLYFISH_SIZE: f32 = 40.0;
    pub const JELLYFISH_MIN_SPEED: f32 = 0.5;
    pub const JELLYFISH_MAX_SPEED: f32 = 2.0;

    /// Wobble ranges (shared by black hole and jellyfish)
    pub const WOBBLE_MIN_AMPLITUDE: f32 = 0.3;
    pub const WOBBLE_MAX_AMPLITUDE: f32 = 0.8;
    pub const WOBBLE_MIN_FREQUENCY: f32 = 0.03; // rad per tick
    pub const WOBBLE_MAX_FREQUENCY: f32 = 0.08;

    /// Direction change cooldown (0.5 s - 3 s at 60 Hz)
    pub const RETARGET_MIN_TICKS: u32 = 30;
    pub const RETARGET_MAX_TICKS: u32 = 180;

    /// Flashing invincibility: toggle every 200 ms, 6 toggles
    pub const FLASH_INTERVAL_TICKS: u32 = 12;
    pub const FLASH_TOGGLES: u32 = 6;

    /// Game over banner: toggle every 500 ms for 3 s
    pub const GAME_OVER_INTERVAL_TICKS: u32 = 30;
    pub const GAME_OVER_TOGGLES: u32 = 6;

    /// Touch drag: velocity per pixel of drag
    pub const TOUCH_SENSITIVITY: f32 = 0.15;
}

/// Canvas size as a vector
#[inline]
pub fn canvas_size() -> Vec2 {
    Vec2::new(consts::CANVAS_WIDTH, consts::CANVAS_HEIGHT)
}

/// Wrap a coordinate into [0, size)
///
/// `rem_euclid` can round up to exactly `size` for tiny negative inputs, so
/// that case folds back to zero.
#[inline]
pub fn wrap_coord(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    if wrapped >= size { 0.0 } else { wrapped }
}

/// Unit vector for an angle in radians
#[inline]
pub fn heading(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
