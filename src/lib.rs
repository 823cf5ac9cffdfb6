//! Be My Valentine - a single-page greeting with a heart-catching minigame
//!
//! Core modules:
//! - `sim`: Deterministic catch-game simulation (hearts, catcher, timers)
//! - `game`: Frame-driven controller wiring the simulation to its ports
//! - `evasion`: The "No" button that runs away
//! - `session`: Page-level state (screens, music, lightbox, effects)
//! - `platform`: Ports to the host page (geometry, results)
//! - `renderer`: Render view and the canvas 2D renderer

pub mod audio;
pub mod effects;
pub mod evasion;
pub mod game;
pub mod lightbox;
pub mod outcome;
pub mod platform;
pub mod renderer;
pub mod screens;
pub mod session;
pub mod settings;
pub mod sim;

pub use evasion::{EvasionBounds, EvasionController, EvasionDisplay};
pub use game::CatchGame;
pub use outcome::{GameResult, ResultTier};
pub use session::PageSession;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks in one second of game time
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted from the host (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Round defaults
    pub const TARGET_SCORE: u32 = 15;
    pub const GAME_DURATION_SECS: u32 = 30;
    pub const SPAWN_INTERVAL_SECS: f32 = 0.8;
    /// Pause between the winning catch and the result screen
    pub const WIN_GRACE_SECS: f32 = 0.5;

    /// Catcher defaults
    pub const CATCHER_SIZE: f32 = 60.0;
    pub const CATCHER_BOTTOM_MARGIN: f32 = 20.0;

    /// Heart defaults
    pub const HEART_SIZE: f32 = 40.0;
    /// Fall speed range in pixels per second (2-4 px per frame at 60 Hz)
    pub const FALL_SPEED_MIN: f32 = 120.0;
    pub const FALL_SPEED_MAX: f32 = 240.0;

    /// Result tier thresholds
    pub const HIGH_TIER_SCORE: u32 = 10;
    pub const MEDIUM_TIER_SCORE: u32 = 5;
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs * consts::TICKS_PER_SECOND as f32).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(1.0), 60);
        assert_eq!(secs_to_ticks(0.8), 48);
        assert_eq!(secs_to_ticks(0.5), 30);
        // Never zero, a zero interval would fire every tick forever
        assert_eq!(secs_to_ticks(0.0), 1);
    }
}
