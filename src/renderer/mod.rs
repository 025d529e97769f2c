//! Rendering module
//!
//! `scene` builds a draw list from the game state on every platform;
//! `canvas` replays it on a Canvas 2D context in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{DrawCmd, Sprite, TextStyle};
