//! Page settings
//!
//! Optional JSON embedded in the page as
//! `<script id="valentine-config" type="application/json">`. Missing fields take
//! their defaults; out-of-range values are clamped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::MUSIC_VOLUME;
use crate::consts::*;
use crate::effects::{CELEBRATION_HEART_COUNT, CONFETTI_COUNT};
use crate::sim::GameConfig;

/// Page settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Catch game ===
    /// Hearts needed to win
    pub target_score: u32,
    /// Round length in seconds
    pub duration_secs: u32,
    /// Seconds between heart spawns
    pub spawn_interval_secs: f32,

    // === Audio ===
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Try to start music as soon as the page loads
    pub autoplay: bool,

    // === Celebration ===
    pub confetti_pieces: usize,
    pub celebration_hearts: usize,
    /// Skip confetti and floating hearts
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_score: TARGET_SCORE,
            duration_secs: GAME_DURATION_SECS,
            spawn_interval_secs: SPAWN_INTERVAL_SECS,

            music_volume: MUSIC_VOLUME,
            autoplay: true,

            confetti_pieces: CONFETTI_COUNT,
            celebration_hearts: CELEBRATION_HEART_COUNT,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Element id of the embedded config
    const CONFIG_ELEMENT_ID: &'static str = "valentine-config";

    /// Parse settings from JSON, clamping anything out of range
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Clamp values into playable ranges
    pub fn validated(mut self) -> Self {
        self.target_score = self.target_score.max(1);
        self.duration_secs = self.duration_secs.clamp(1, 600);
        self.spawn_interval_secs = if self.spawn_interval_secs.is_finite() {
            self.spawn_interval_secs.clamp(0.1, 10.0)
        } else {
            SPAWN_INTERVAL_SECS
        };
        self.music_volume = if self.music_volume.is_finite() {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            MUSIC_VOLUME
        };
        self.confetti_pieces = self.confetti_pieces.min(500);
        self.celebration_hearts = self.celebration_hearts.min(200);
        self
    }

    /// Round tuning for the catch game
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            target_score: self.target_score,
            duration_secs: self.duration_secs,
            spawn_interval_secs: self.spawn_interval_secs,
            win_grace_secs: WIN_GRACE_SECS,
            catcher_size: Vec2::splat(CATCHER_SIZE),
            heart_size: HEART_SIZE,
            fall_speed: (FALL_SPEED_MIN, FALL_SPEED_MAX),
        }
    }

    /// Confetti and heart counts after reduced motion is applied
    pub fn effective_confetti(&self) -> usize {
        if self.reduced_motion {
            0
        } else {
            self.confetti_pieces
        }
    }

    pub fn effective_celebration_hearts(&self) -> usize {
        if self.reduced_motion {
            0
        } else {
            self.celebration_hearts
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from #{}", Self::CONFIG_ELEMENT_ID);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native: settings from `VALENTINE_CONFIG` if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::CONFIG_ELEMENT_ID.to_uppercase().replace('-', "_")) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "target_score": 10 }"#).unwrap();
        assert_eq!(settings.target_score, 10);
        assert_eq!(settings.duration_secs, GAME_DURATION_SECS);
        assert_eq!(settings.music_volume, MUSIC_VOLUME);
        assert!(settings.autoplay);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ target_score: ").is_err());
        assert!(Settings::from_json(r#"{ "target_score": "lots" }"#).is_err());
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let settings = Settings::from_json(
            r#"{ "target_score": 0, "duration_secs": 0, "spawn_interval_secs": 0.0, "music_volume": 7.5 }"#,
        )
        .unwrap();
        assert_eq!(settings.target_score, 1);
        assert_eq!(settings.duration_secs, 1);
        assert_eq!(settings.spawn_interval_secs, 0.1);
        assert_eq!(settings.music_volume, 1.0);
    }

    #[test]
    fn test_game_config_follows_settings() {
        let settings = Settings {
            target_score: 20,
            duration_secs: 45,
            ..Default::default()
        };
        let config = settings.game_config();
        assert_eq!(config.target_score, 20);
        assert_eq!(config.duration_secs, 45);
        assert_eq!(Settings::default().game_config(), GameConfig::default());
    }

    #[test]
    fn test_reduced_motion_disables_effects() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_confetti(), 0);
        assert_eq!(settings.effective_celebration_hearts(), 0);
        assert_eq!(Settings::default().effective_confetti(), CONFETTI_COUNT);
    }
}
