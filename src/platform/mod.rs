//! Platform abstraction layer
//!
//! Ports the game controller talks through instead of reaching into the page:
//! - Play-area geometry
//! - Result/HUD reporting
//!
//! Browser implementations live in `web` (wasm only).

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::outcome::GameResult;

/// Element id of the catch game's canvas
pub const GAME_CANVAS_ID: &str = "gameCanvas";

/// Touch drags that start on the canvas steer the catcher instead of
/// scrolling the page, whether or not a round is running
pub fn blocks_touch_scroll(target_id: &str) -> bool {
    target_id == GAME_CANVAS_ID
}

/// Geometry provider for the play area
pub trait PlayArea {
    /// Current play-area size in pixels
    fn size(&self) -> Vec2;
}

/// A fixed-size play area (headless runs, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedArea(pub Vec2);

impl PlayArea for FixedArea {
    fn size(&self) -> Vec2 {
        self.0
    }
}

/// Presentation collaborator for round progress and the final result
pub trait ResultSink {
    /// Called exactly once per round
    fn finished(&mut self, result: &GameResult);

    fn score_changed(&mut self, _score: u32) {}

    fn time_changed(&mut self, _time_left: u32) {}
}
