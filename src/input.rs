//! Keyboard and touch capture
//!
//! Browser events land here and are folded into a `TickInput` once per tick.
//! Nothing in this module touches the DOM, so it runs under `cargo test`.

use glam::Vec2;

use crate::sim::TickInput;

/// Arrow-key flags plus a one-shot pause request
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pause_requested: bool,
}

impl KeyState {
    /// Handle a `keydown`; returns true if the key belongs to the game
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            " " | "Spacebar" => {
                self.pause_requested = true;
                true
            }
            _ => self.set_direction(key, true),
        }
    }

    /// Handle a `keyup`; returns true if the key belongs to the game
    pub fn key_up(&mut self, key: &str) -> bool {
        match key {
            " " | "Spacebar" => true,
            _ => self.set_direction(key, false),
        }
    }

    fn set_direction(&mut self, key: &str, pressed: bool) -> bool {
        let flag = match key {
            "ArrowUp" => &mut self.up,
            "ArrowDown" => &mut self.down,
            "ArrowLeft" => &mut self.left,
            "ArrowRight" => &mut self.right,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    /// Drop every held key (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.left = false;
        self.right = false;
    }
}

/// Single-finger drag converted to a velocity
#[derive(Debug, Clone, Default)]
pub struct TouchDrag {
    origin: Option<Vec2>,
    current: Vec2,
}

impl TouchDrag {
    pub fn start(&mut self, point: Vec2) {
        self.origin = Some(point);
        self.current = point;
    }

    pub fn move_to(&mut self, point: Vec2) {
        if self.origin.is_some() {
            self.current = point;
        }
    }

    pub fn end(&mut self) {
        self.origin = None;
    }

    pub fn active(&self) -> bool {
        self.origin.is_some()
    }

    /// Drag delta scaled by `sensitivity`, capped at `max_speed`
    pub fn velocity(&self, sensitivity: f32, max_speed: f32) -> Option<Vec2> {
        let origin = self.origin?;
        Some(((self.current - origin) * sensitivity).clamp_length_max(max_speed))
    }
}

/// Everything the frontend has captured since the last tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keys: KeyState,
    pub touch: TouchDrag,
    /// Pause requested by the host (blur, hidden tab)
    auto_pause: bool,
}

impl InputState {
    /// Request a pause that only applies if the game is running
    pub fn request_auto_pause(&mut self) {
        self.auto_pause = true;
        self.keys.release_all();
        self.touch.end();
    }

    /// Input for one tick; clears one-shot requests
    ///
    /// `paused` is the current pause flag, so an auto-pause never unpauses.
    pub fn snapshot(&mut self, sensitivity: f32, max_speed: f32, paused: bool) -> TickInput {
        let toggle = std::mem::take(&mut self.keys.pause_requested);
        let auto = std::mem::take(&mut self.auto_pause) && !paused;
        TickInput {
            up: self.keys.up,
            down: self.keys.down,
            left: self.keys.left,
            right: self.keys.right,
            touch: self.touch.velocity(sensitivity, max_speed),
            pause: toggle != auto,
        }
    }
}
