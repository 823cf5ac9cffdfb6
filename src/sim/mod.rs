//! Deterministic simulation module
//!
//! All catch-game logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers counted in ticks, never wall-clock time
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use state::{Catcher, GameConfig, GameEvent, GamePhase, GameState, Heart, Outcome, HEART_GLYPHS};
pub use tick::{finish, resize, set_player_x, start, tick};
