//! Motion primitives: black hole gravity, wobble drift, edge bounce, wrap

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{heading, wrap_coord};

/// Pull exerted by the black hole on a body
///
/// Inside `reach` the magnitude is `strength * (reach - distance)` along the
/// unit vector toward the hole. Closer than `min_distance` the direction is
/// undefined, so the pull is zero.
pub fn gravity_pull(
    body_center: Vec2,
    hole_center: Vec2,
    reach: f32,
    strength: f32,
    min_distance: f32,
) -> Vec2 {
    let offset = hole_center - body_center;
    let distance = offset.length();
    if distance >= reach || distance < min_distance {
        return Vec2::ZERO;
    }
    offset / distance * strength * (reach - distance)
}

/// Sinusoidal offset layered on top of linear velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wobble {
    pub phase: f32,
    pub amplitude: f32,
    /// Radians per tick
    pub frequency: f32,
    /// +1 or -1
    pub direction: f32,
}

impl Wobble {
    pub fn random<R: Rng>(rng: &mut R, amplitude: (f32, f32), frequency: (f32, f32)) -> Self {
        Self {
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            amplitude: sample(rng, amplitude),
            frequency: sample(rng, frequency),
            direction: random_sign(rng),
        }
    }

    /// Accumulate phase and return this tick's offset
    pub fn advance(&mut self) -> Vec2 {
        self.phase =
            (self.phase + self.frequency * self.direction).rem_euclid(std::f32::consts::TAU);
        Vec2::new(self.amplitude * self.phase.sin(), self.amplitude * self.phase.cos())
    }
}

/// Linear velocity plus wobble, resampled on a randomized cooldown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub vel: Vec2,
    pub wobble: Wobble,
    /// Ticks until the next direction change
    pub retarget_ticks: u32,
}

/// Ranges used to (re)sample a drift
#[derive(Debug, Clone, Copy)]
pub struct DriftRanges {
    pub speed: (f32, f32),
    pub amplitude: (f32, f32),
    pub frequency: (f32, f32),
    pub retarget: (u32, u32),
}

impl Drift {
    pub fn random<R: Rng>(rng: &mut R, ranges: &DriftRanges) -> Self {
        Self {
            vel: random_velocity(rng, ranges.speed),
            wobble: Wobble::random(rng, ranges.amplitude, ranges.frequency),
            retarget_ticks: sample_ticks(rng, ranges.retarget),
        }
    }

    /// Displacement for this tick; resamples heading when the cooldown ends
    pub fn step<R: Rng>(&mut self, rng: &mut R, ranges: &DriftRanges) -> Vec2 {
        self.retarget_ticks = self.retarget_ticks.saturating_sub(1);
        if self.retarget_ticks == 0 {
            self.vel = random_velocity(rng, ranges.speed);
            self.wobble.direction = random_sign(rng);
            self.retarget_ticks = sample_ticks(rng, ranges.retarget);
        }
        self.vel + self.wobble.advance()
    }
}

/// Reflect off the edges of `[min, max]`
///
/// A component that crossed an edge is pulled back onto it and its velocity
/// is pointed back inside, so wobble cannot carry a body off the canvas.
pub fn bounce_in_bounds(pos: Vec2, vel: Vec2, min: Vec2, max: Vec2) -> (Vec2, Vec2) {
    let mut vel = vel;
    if pos.x < min.x {
        vel.x = vel.x.abs();
    } else if pos.x > max.x {
        vel.x = -vel.x.abs();
    }
    if pos.y < min.y {
        vel.y = vel.y.abs();
    } else if pos.y > max.y {
        vel.y = -vel.y.abs();
    }
    (pos.clamp(min, max), vel)
}

/// Wrap a position into `[0, size)` on both axes
pub fn wrap_position(pos: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(wrap_coord(pos.x, size.x), wrap_coord(pos.y, size.y))
}

fn sample<R: Rng>(rng: &mut R, range: (f32, f32)) -> f32 {
    if range.1 > range.0 {
        rng.random_range(range.0..=range.1)
    } else {
        range.0
    }
}

fn sample_ticks<R: Rng>(rng: &mut R, range: (u32, u32)) -> u32 {
    let lo = range.0.max(1);
    let hi = range.1.max(lo);
    rng.random_range(lo..=hi)
}

fn random_sign<R: Rng>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

fn random_velocity<R: Rng>(rng: &mut R, speed: (f32, f32)) -> Vec2 {
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    heading(theta) * sample(rng, speed)
}
