//! Rendering module
//!
//! The simulation never draws. Each frame the controller builds a `Frame` (the
//! glyphs and their positions) and hands it to a `RenderSink`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

use crate::sim::GameState;
use crate::sim::state::CATCHER_GLYPH;

/// A glyph drawn at a position. `pos` is the top-left of its box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub glyph: &'static str,
    pub pos: Vec2,
    /// Box height in pixels (also the font size)
    pub size: f32,
}

/// Everything needed to redraw the play surface once
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub play_area: Vec2,
    pub catcher: Sprite,
    pub hearts: Vec<Sprite>,
}

impl Frame {
    pub fn from_state(state: &GameState) -> Self {
        let catcher = state.catcher.rect;
        Self {
            play_area: state.play_area,
            catcher: Sprite {
                glyph: CATCHER_GLYPH,
                pos: catcher.pos,
                size: catcher.size.y,
            },
            hearts: state
                .hearts
                .iter()
                .map(|h| Sprite {
                    glyph: h.glyph,
                    pos: h.rect.pos,
                    size: h.rect.size.y,
                })
                .collect(),
        }
    }
}

/// Drawing collaborator: clears and redraws the play surface from a frame
pub trait RenderSink {
    fn draw(&mut self, frame: &Frame);
}

/// Renders nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn draw(&mut self, _frame: &Frame) {}
}
