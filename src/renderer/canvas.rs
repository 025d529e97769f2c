//! Canvas 2D playback of scene commands

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{DrawCmd, Sprite, TextStyle};
use crate::platform::assets::Assets;

/// Jellyfish palette
const BELL_FILL: &str = "rgba(255,140,200,0.85)";
const BELL_RIM: &str = "rgba(200,60,150,0.9)";
const TENTACLE: &str = "rgba(255,170,220,0.8)";
const TENTACLES: usize = 4;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    assets: Assets,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, assets: Assets, width: f64, height: f64) -> Self {
        Self {
            ctx,
            assets,
            width,
            height,
        }
    }

    /// Clear and replay a full frame
    pub fn render(&self, cmds: &[DrawCmd]) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        for cmd in cmds {
            match cmd {
                DrawCmd::Image { sprite, pos, size } => {
                    let image = match sprite {
                        Sprite::Background => &self.assets.background,
                        Sprite::Player => &self.assets.player,
                    };
                    self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        image,
                        pos.x as f64,
                        pos.y as f64,
                        size.x as f64,
                        size.y as f64,
                    )?;
                }
                DrawCmd::BlackHole { center, radius } => {
                    self.draw_black_hole(center.x as f64, center.y as f64, *radius as f64)?;
                }
                DrawCmd::Jellyfish { pos, size, sway } => {
                    self.draw_jellyfish(pos.x as f64, pos.y as f64, *size as f64, *sway as f64)?;
                }
                DrawCmd::Text { text, pos, style } => {
                    let (font, color) = match style {
                        TextStyle::Hud => ("20px Arial", "black"),
                        TextStyle::Banner => ("50px Arial", "red"),
                    };
                    self.ctx.set_font(font);
                    self.ctx.set_fill_style_str(color);
                    self.ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
        }
        Ok(())
    }

    fn draw_black_hole(&self, x: f64, y: f64, r: f64) -> Result<(), JsValue> {
        let gradient = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r)?;
        gradient.add_color_stop(0.0, "black")?;
        gradient.add_color_stop(1.0, "transparent")?;

        self.ctx.begin_path();
        self.ctx.arc(x, y, r, 0.0, 2.0 * PI)?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill();
        Ok(())
    }

    fn draw_jellyfish(&self, x: f64, y: f64, size: f64, sway: f64) -> Result<(), JsValue> {
        let cx = x + size / 2.0;
        let bell_r = size / 2.0;
        let bell_y = y + bell_r;

        // Tentacles hang from the bell rim and sway with the wobble phase
        self.ctx.set_stroke_style_str(TENTACLE);
        self.ctx.set_line_width(2.0);
        for i in 0..TENTACLES {
            let t = (i as f64 + 0.5) / TENTACLES as f64;
            let root_x = x + size * t;
            let drift = (sway + i as f64).sin() * size * 0.15;
            self.ctx.begin_path();
            self.ctx.move_to(root_x, bell_y);
            self.ctx
                .quadratic_curve_to(root_x + drift, bell_y + size * 0.25, root_x - drift, y + size);
            self.ctx.stroke();
        }

        // Half-disc bell
        self.ctx.begin_path();
        self.ctx.arc(cx, bell_y, bell_r, PI, 2.0 * PI)?;
        self.ctx.close_path();
        self.ctx.set_fill_style_str(BELL_FILL);
        self.ctx.fill();
        self.ctx.set_stroke_style_str(BELL_RIM);
        self.ctx.set_line_width(1.5);
        self.ctx.stroke();
        Ok(())
    }
}
