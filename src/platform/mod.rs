//! Platform abstraction layer
//!
//! Browser-only glue: DOM lookups and image loading. Everything that can run
//! natively lives in `sim`, `input` and `renderer::scene`.

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod browser;

/// Image paths relative to the page
pub const PLAYER_SPRITE_PATH: &str = "images/spongebobp.png";
pub const BACKGROUND_PATH: &str = "images/bikini-bottom-background.jpg";
