//! Image assets, fully decoded before the first frame

use anyhow::Result;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use super::{BACKGROUND_PATH, PLAYER_SPRITE_PATH};
use crate::error::GameError;

pub struct Assets {
    pub player: HtmlImageElement,
    pub background: HtmlImageElement,
}

impl Assets {
    /// Load every image; any failure aborts startup
    pub async fn load() -> Result<Self> {
        let player = load_image(PLAYER_SPRITE_PATH).await?;
        let background = load_image(BACKGROUND_PATH).await?;
        log::info!("Assets loaded");
        Ok(Self { player, background })
    }
}

/// Fetch and decode one image
pub async fn load_image(path: &str) -> Result<HtmlImageElement, GameError> {
    let fail = |reason: String| GameError::AssetLoad {
        path: path.to_string(),
        reason,
    };

    let image = HtmlImageElement::new().map_err(|e| fail(format!("{:?}", e)))?;
    image.set_src(path);
    JsFuture::from(image.decode())
        .await
        .map_err(|e| fail(format!("decode failed: {:?}", e)))?;

    if image.natural_width() == 0 || image.natural_height() == 0 {
        return Err(fail("image has no pixels".to_string()));
    }
    log::debug!("Loaded {} ({}x{})", path, image.natural_width(), image.natural_height());
    Ok(image)
}
