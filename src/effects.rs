//! Decorative particles: confetti and floating hearts
//!
//! Only the randomized parameters are produced here; the page turns them into
//! short-lived DOM nodes and removes each one after its lifetime.

use rand::Rng;

pub const CONFETTI_COLORS: [&str; 5] = ["#ff4081", "#f50057", "#ff80ab", "#ffc1e3", "#c51162"];
pub const AMBIENT_HEART_GLYPHS: [&str; 8] = ["💕", "💖", "💗", "💝", "💘", "💞", "❤️", "🌹"];
pub const CELEBRATION_HEART_GLYPHS: [&str; 5] = ["💖", "💕", "💗", "💝", "💘"];

pub const CONFETTI_COUNT: usize = 100;
pub const CONFETTI_STAGGER_MS: u32 = 30;
pub const CONFETTI_LIFETIME_MS: u32 = 5000;

pub const CELEBRATION_HEART_COUNT: usize = 30;
pub const CELEBRATION_HEART_STAGGER_MS: u32 = 100;
pub const CELEBRATION_HEART_LIFETIME_MS: u32 = 8000;

pub const AMBIENT_HEART_INITIAL: usize = 15;
pub const AMBIENT_HEART_INTERVAL_MS: u32 = 3000;
pub const AMBIENT_HEART_LIFETIME_MS: u32 = 10000;

/// One confetti piece
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    /// Horizontal position, percent of the viewport
    pub left_pct: f32,
    pub color: &'static str,
    pub delay_secs: f32,
    pub duration_secs: f32,
    /// When to insert it, relative to the burst
    pub spawn_at_ms: u32,
    pub lifetime_ms: u32,
}

/// One floating heart
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingHeart {
    pub glyph: &'static str,
    pub left_pct: f32,
    pub font_rem: f32,
    pub duration_secs: f32,
    pub spawn_at_ms: u32,
    pub lifetime_ms: u32,
}

pub fn confetti_burst<R: Rng>(rng: &mut R, count: usize) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|i| ConfettiPiece {
            left_pct: rng.random::<f32>() * 100.0,
            color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
            delay_secs: rng.random::<f32>() * 2.0,
            duration_secs: rng.random::<f32>() * 2.0 + 3.0,
            spawn_at_ms: i as u32 * CONFETTI_STAGGER_MS,
            lifetime_ms: CONFETTI_LIFETIME_MS,
        })
        .collect()
}

pub fn celebration_hearts<R: Rng>(rng: &mut R, count: usize) -> Vec<FloatingHeart> {
    (0..count)
        .map(|i| FloatingHeart {
            glyph: CELEBRATION_HEART_GLYPHS[rng.random_range(0..CELEBRATION_HEART_GLYPHS.len())],
            left_pct: rng.random::<f32>() * 100.0,
            font_rem: rng.random::<f32>() * 2.0 + 2.0,
            duration_secs: rng.random::<f32>() * 3.0 + 4.0,
            spawn_at_ms: i as u32 * CELEBRATION_HEART_STAGGER_MS,
            lifetime_ms: CELEBRATION_HEART_LIFETIME_MS,
        })
        .collect()
}

/// A background heart (15 at load, then one every few seconds)
pub fn ambient_heart<R: Rng>(rng: &mut R) -> FloatingHeart {
    FloatingHeart {
        glyph: AMBIENT_HEART_GLYPHS[rng.random_range(0..AMBIENT_HEART_GLYPHS.len())],
        left_pct: rng.random::<f32>() * 100.0,
        font_rem: rng.random::<f32>() * 1.5 + 1.0,
        duration_secs: rng.random::<f32>() * 5.0 + 5.0,
        spawn_at_ms: 0,
        lifetime_ms: AMBIENT_HEART_LIFETIME_MS,
    }
}
