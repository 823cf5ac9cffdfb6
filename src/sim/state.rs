//! Game state and core simulation types
//!
//! A fresh `GameState` is built for every round; nothing here outlives the round.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::secs_to_ticks;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started yet
    Idle,
    /// Active gameplay
    Running,
    /// Target score reached (result follows after the win grace)
    Won,
    /// Countdown expired before the target was reached
    TimedOut,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    TimedOut,
}

impl Outcome {
    pub fn phase(self) -> GamePhase {
        match self {
            Outcome::Won => GamePhase::Won,
            Outcome::TimedOut => GamePhase::TimedOut,
        }
    }
}

/// Something the host may want to react to, drained after each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A heart was spawned at the top of the play area
    Spawned,
    /// A heart was caught; carries the new score
    Caught { score: u32 },
    /// A heart fell past the bottom
    Missed,
    /// One second of the countdown elapsed
    TimeChanged { time_left: u32 },
    /// Score reached the target; the result is held back for the win grace
    TargetReached,
    /// The round is over
    Finished(Outcome),
}

/// Heart glyphs picked at spawn
pub const HEART_GLYPHS: [&str; 5] = ["💖", "💕", "💗", "💘", "💞"];

/// Catcher glyph
pub const CATCHER_GLYPH: &str = "🤲";

/// Round tuning. Defaults match the shipped game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Hearts needed to win
    pub target_score: u32,
    /// Countdown start (seconds)
    pub duration_secs: u32,
    pub spawn_interval_secs: f32,
    pub win_grace_secs: f32,
    pub catcher_size: Vec2,
    pub heart_size: f32,
    /// Fall speed range in px/s (min inclusive, max exclusive)
    pub fall_speed: (f32, f32),
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: TARGET_SCORE,
            duration_secs: GAME_DURATION_SECS,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            win_grace_secs: WIN_GRACE_SECS,
            catcher_size: Vec2::splat(CATCHER_SIZE),
            heart_size: HEART_SIZE,
            fall_speed: (FALL_SPEED_MIN, FALL_SPEED_MAX),
        }
    }
}

/// The player's catcher. `y` is fixed for the round, `x` follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Catcher {
    pub rect: Rect,
}

impl Catcher {
    /// Catcher centred horizontally, resting just above the bottom edge
    pub fn centered(play_area: Vec2, size: Vec2) -> Self {
        let x = play_area.x / 2.0 - size.x / 2.0;
        let y = play_area.y - size.y - CATCHER_BOTTOM_MARGIN;
        Self {
            rect: Rect::new(x, y, size.x, size.y),
        }
    }
}

/// A falling heart
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub rect: Rect,
    /// Pixels per second
    pub fall_speed: f32,
    pub glyph: &'static str,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub score: u32,
    /// Seconds left on the countdown
    pub time_left: u32,
    pub target_score: u32,
    /// Play area size in pixels
    pub play_area: Vec2,
    pub catcher: Catcher,
    /// Hearts currently falling
    pub hearts: Vec<Heart>,
    /// Simulation tick counter (since start)
    pub time_ticks: u64,
    /// Ticks left before a win is finalized
    pub win_grace_ticks: Option<u32>,
    /// Result already emitted; nothing mutates the round after this
    pub ended: bool,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// A dormant state, before the first `start`
    pub fn idle(config: GameConfig, play_area: Vec2) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            time_left: config.duration_secs,
            target_score: config.target_score,
            play_area,
            catcher: Catcher::centered(play_area, config.catcher_size),
            hearts: Vec::new(),
            time_ticks: 0,
            win_grace_ticks: None,
            ended: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(0),
            config,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Ticks between countdown decrements
    pub fn countdown_ticks(&self) -> u32 {
        TICKS_PER_SECOND
    }

    /// Ticks between spawns
    pub fn spawn_ticks(&self) -> u32 {
        secs_to_ticks(self.config.spawn_interval_secs)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
