//! Tick-driven blink counter
//!
//! Drives both timed visual states (flashing invincibility and the game-over
//! banner). Visibility flips every `interval` ticks; after `toggles` flips the
//! blink reports `Finished` once and goes idle.

use serde::{Deserialize, Serialize};

/// Result of advancing a blink by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkStep {
    /// Still running, visibility unchanged this tick
    Running,
    /// Visibility flipped this tick
    Toggled,
    /// Final toggle reached; reported exactly once
    Finished,
    /// Already finished
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blink {
    interval: u32,
    total: u32,
    toggles: u32,
    ticks: u32,
    finished: bool,
}

impl Blink {
    /// A blink always runs for at least one toggle
    pub fn new(interval: u32, total: u32) -> Self {
        Self {
            interval: interval.max(1),
            total: total.max(1),
            toggles: 0,
            ticks: 0,
            finished: false,
        }
    }

    /// Advance by one tick
    pub fn advance(&mut self) -> BlinkStep {
        if self.finished {
            return BlinkStep::Idle;
        }
        self.ticks += 1;
        if self.ticks < self.interval {
            return BlinkStep::Running;
        }
        self.ticks = 0;
        self.toggles += 1;
        if self.toggles >= self.total {
            self.finished = true;
            BlinkStep::Finished
        } else {
            BlinkStep::Toggled
        }
    }

    /// Visible on even toggle counts
    pub fn visible(&self) -> bool {
        self.toggles % 2 == 0
    }
}
