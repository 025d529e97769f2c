//! DOM helpers with error context

use anyhow::{Result, anyhow};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::GameError;

/// Canvas element id
pub const CANVAS_ID: &str = "game-canvas";

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| GameError::MissingBrowserObject("window").into())
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| GameError::MissingBrowserObject("document").into())
}

/// Find the game canvas or create it at the logical resolution
pub fn canvas() -> Result<HtmlCanvasElement> {
    let doc = document()?;
    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el
            .dyn_into()
            .map_err(|el| anyhow!("#{} is not a canvas: {:?}", CANVAS_ID, el))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")
                .map_err(|e| anyhow!("could not create canvas: {:?}", e))?
                .dyn_into()
                .map_err(|el| anyhow!("created element is not a canvas: {:?}", el))?;
            c.set_id(CANVAS_ID);
            doc.body()
                .ok_or(GameError::MissingBrowserObject("body"))?
                .append_child(&c)
                .map_err(|e| anyhow!("could not attach canvas: {:?}", e))?;
            c
        }
    };
    canvas.set_width(CANVAS_WIDTH as u32);
    canvas.set_height(CANVAS_HEIGHT as u32);
    Ok(canvas)
}

pub fn context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow!("getContext failed: {:?}", e))?
        .ok_or(GameError::MissingBrowserObject("2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|obj| anyhow!("not a 2d context: {:?}", obj))
}

/// Convert an error into something `wasm_bindgen` can throw
pub fn to_js(err: anyhow::Error) -> wasm_bindgen::JsValue {
    wasm_bindgen::JsValue::from_str(&format!("{:#}", err))
}
