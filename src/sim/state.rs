//! Game state and core simulation types
//!
//! One `GameState` owns every entity. It is reset in place between runs
//! rather than rebuilt.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::blink::Blink;
use super::collision::Aabb;
use super::physics::{Drift, DriftRanges};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, PLAYER_START_OFFSET_Y};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Playing,
    /// Invincible after a hit; sprite blinks
    Flashing(Blink),
    /// Out of lives; banner blinks, then the run resets
    GameOver(Blink),
}

/// Things that happened during a tick (drained by the frontend)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Black hole hit with lives remaining
    Hit { lives: u32 },
    /// Black hole hit on the last life
    GameOver { score: u32 },
    /// Game-over display finished, run restarted
    Reset,
    JellyfishCaught { index: usize, score: u32 },
    Paused,
    Resumed,
    /// Flashing ended
    Vulnerable,
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub lives: u32,
    pub score: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Self::start_position(tuning.player_size),
            vel: Vec2::ZERO,
            size: tuning.player_size,
            lives: tuning.starting_lives,
            score: 0,
        }
    }

    /// Below the canvas center, pulled back so a sprite of `size` fits
    pub fn start_position(size: f32) -> Vec2 {
        let preferred = Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 + PLAYER_START_OFFSET_Y);
        let max = (Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) - Vec2::splat(size)).max(Vec2::ZERO);
        preferred.clamp(Vec2::ZERO, max)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn respawn(&mut self) {
        self.pos = Self::start_position(self.size);
        self.vel = Vec2::ZERO;
    }
}

/// The wandering obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackHole {
    pub center: Vec2,
    pub radius: f32,
    pub drift: Drift,
}

impl BlackHole {
    pub fn start_position() -> Vec2 {
        Vec2::new(CANVAS_WIDTH / 2.0 - 100.0, CANVAS_HEIGHT / 2.0 - 100.0)
    }

    /// Bounds for the center so the whole circle stays on the canvas
    pub fn center_bounds(&self) -> (Vec2, Vec2) {
        let r = Vec2::splat(self.radius);
        (r, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT) - r)
    }
}

/// A collectible jellyfish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jellyfish {
    /// Top-left corner
    pub pos: Vec2,
    pub size: f32,
    pub drift: Drift,
}

impl Jellyfish {
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    /// Bounds for the top-left corner so the box stays on the canvas
    pub fn pos_bounds(&self) -> (Vec2, Vec2) {
        (Vec2::ZERO, Vec2::new(CANVAS_WIDTH - self.size, CANVAS_HEIGHT - self.size))
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub paused: bool,
    /// Simulation tick counter (not advanced while paused)
    pub time_ticks: u64,
    pub player: Player,
    pub black_hole: BlackHole,
    pub jellyfish: Vec<Jellyfish>,
    /// Events from the last ticks, oldest first
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let black_hole = spawn_black_hole(&mut rng, &tuning);
        let jellyfish = (0..tuning.jellyfish_count)
            .map(|_| spawn_jellyfish(&mut rng, &tuning))
            .collect();
        Self {
            seed,
            rng,
            player: Player::new(&tuning),
            black_hole,
            jellyfish,
            tuning,
            phase: GamePhase::Playing,
            paused: false,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn flashing(&self) -> bool {
        matches!(self.phase, GamePhase::Flashing(_))
    }

    /// Start the post-hit invincibility blink
    pub fn start_flashing(&mut self) {
        self.phase = GamePhase::Flashing(Blink::new(
            self.tuning.flash_interval_ticks,
            self.tuning.flash_toggles,
        ));
    }

    pub fn start_game_over(&mut self) {
        self.phase = GamePhase::GameOver(Blink::new(
            self.tuning.game_over_interval_ticks,
            self.tuning.game_over_toggles,
        ));
    }

    /// Restore starting lives and score, respawn everything, then protect
    /// the fresh player with a flash
    pub fn reset_run(&mut self) {
        self.player = Player::new(&self.tuning);
        self.black_hole = spawn_black_hole(&mut self.rng, &self.tuning);
        let tuning = &self.tuning;
        let rng = &mut self.rng;
        self.jellyfish = (0..tuning.jellyfish_count)
            .map(|_| spawn_jellyfish(rng, tuning))
            .collect();
        self.paused = false;
        self.start_flashing();
    }

    /// Move a jellyfish to a random spot with fresh motion
    pub fn respawn_jellyfish(&mut self, index: usize) {
        let fresh = spawn_jellyfish(&mut self.rng, &self.tuning);
        if let Some(jelly) = self.jellyfish.get_mut(index) {
            *jelly = fresh;
        }
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

pub fn black_hole_ranges(tuning: &Tuning) -> DriftRanges {
    DriftRanges {
        speed: tuning.black_hole_speed,
        amplitude: tuning.wobble_amplitude,
        frequency: tuning.wobble_frequency,
        retarget: tuning.retarget_ticks,
    }
}

pub fn jellyfish_ranges(tuning: &Tuning) -> DriftRanges {
    DriftRanges {
        speed: tuning.jellyfish_speed,
        ..black_hole_ranges(tuning)
    }
}

fn spawn_black_hole<R: Rng>(rng: &mut R, tuning: &Tuning) -> BlackHole {
    BlackHole {
        center: BlackHole::start_position(),
        radius: tuning.black_hole_radius,
        drift: Drift::random(rng, &black_hole_ranges(tuning)),
    }
}

fn spawn_jellyfish<R: Rng>(rng: &mut R, tuning: &Tuning) -> Jellyfish {
    let size = tuning.jellyfish_size;
    let pos = Vec2::new(
        rng.random_range(0.0..=(CANVAS_WIDTH - size)),
        rng.random_range(0.0..=(CANVAS_HEIGHT - size)),
    );
    Jellyfish {
        pos,
        size,
        drift: Drift::random(rng, &jellyfish_ranges(tuning)),
    }
}
