//! Canvas 2D renderer
//!
//! Draws emoji glyphs with `fillText`, baseline at the bottom of each sprite box.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Frame, RenderSink, Sprite};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    fn draw_sprite(&self, sprite: &Sprite) {
        self.ctx.set_font(&format!("{}px Arial", sprite.size));
        let _ = self.ctx.fill_text(
            sprite.glyph,
            sprite.pos.x as f64,
            (sprite.pos.y + sprite.size) as f64,
        );
    }
}

impl RenderSink for CanvasRenderer {
    fn draw(&mut self, frame: &Frame) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.draw_sprite(&frame.catcher);
        for heart in &frame.hearts {
            self.draw_sprite(heart);
        }
    }
}
