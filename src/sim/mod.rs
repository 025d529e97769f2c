//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod blink;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use blink::{Blink, BlinkStep};
pub use collision::{Aabb, circles_overlap, player_hits_black_hole};
pub use physics::{Drift, DriftRanges, Wobble, bounce_in_bounds, gravity_pull, wrap_position};
pub use state::{BlackHole, GameEvent, GamePhase, GameState, Jellyfish, Player};
pub use tick::{TickInput, tick};
