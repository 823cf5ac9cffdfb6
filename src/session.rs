//! Page session: everything the page keeps between clicks
//!
//! Built once when the page loads and handed by reference to the event glue.
//! The catch game is owned separately (it carries the render/result ports).

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{MusicCommand, MusicState};
use crate::effects::{self, ConfettiPiece, FloatingHeart};
use crate::evasion::{EvasionBounds, EvasionController, EvasionDisplay};
use crate::lightbox::{Lightbox, LightboxTarget};
use crate::screens::{KeyCommand, Screen, ScreenChange, ScreenNavigator};
use crate::settings::Settings;

/// A navigation plus anything the page must apply because of it
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub change: ScreenChange,
    /// Set when the question was (re-)entered and the No button went home
    pub evasion: Option<EvasionDisplay>,
}

/// Everything the page does when the question is answered with yes
#[derive(Debug, Clone, PartialEq)]
pub struct Celebration {
    pub navigation: Navigation,
    /// Start background music (it was paused)
    pub music: Option<MusicCommand>,
    pub confetti: Vec<ConfettiPiece>,
    pub hearts: Vec<FloatingHeart>,
}

/// Result of a keyboard shortcut
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Navigated(Navigation),
    Accepted(Celebration),
}

pub struct PageSession {
    settings: Settings,
    navigator: ScreenNavigator,
    evasion: EvasionController,
    music: MusicState,
    lightbox: Lightbox,
    rng: Pcg32,
}

impl PageSession {
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            navigator: ScreenNavigator::default(),
            evasion: EvasionController::new(seed),
            music: MusicState::new(settings.music_volume),
            lightbox: Lightbox::default(),
            rng: Pcg32::seed_from_u64(seed.rotate_left(32)),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    pub fn evasion(&self) -> &EvasionController {
        &self.evasion
    }

    pub fn music(&self) -> &MusicState {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicState {
        &mut self.music
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn show(&mut self, screen: Screen) -> Navigation {
        let change = self.navigator.show(screen);
        let evasion = change.entered_question().then(|| self.evasion.reset());
        Navigation { change, evasion }
    }

    /// The No button was pressed
    pub fn reject(&mut self, bounds: EvasionBounds) -> EvasionDisplay {
        self.evasion.on_reject(bounds)
    }

    /// The Yes button was pressed
    pub fn accept(&mut self) -> Celebration {
        let navigation = self.show(Screen::Celebration);
        let music = self.music.ensure_playing();
        let confetti = effects::confetti_burst(&mut self.rng, self.settings.effective_confetti());
        let hearts =
            effects::celebration_hearts(&mut self.rng, self.settings.effective_celebration_hearts());
        log::info!("Yes! {} confetti, {} hearts", confetti.len(), hearts.len());
        Celebration {
            navigation,
            music,
            confetti,
            hearts,
        }
    }

    pub fn key(&mut self, key: &str) -> Option<KeyOutcome> {
        match KeyCommand::from_key(self.screen(), key)? {
            KeyCommand::Proceed => Some(KeyOutcome::Navigated(self.show(Screen::Question))),
            KeyCommand::Accept => Some(KeyOutcome::Accepted(self.accept())),
        }
    }

    pub fn toggle_music(&mut self) -> MusicCommand {
        self.music.toggle()
    }

    pub fn ambient_heart(&mut self) -> Option<FloatingHeart> {
        if self.settings.reduced_motion {
            None
        } else {
            Some(effects::ambient_heart(&mut self.rng))
        }
    }

    pub fn open_lightbox(&mut self, src: impl Into<String>) {
        self.lightbox.open(src);
    }

    pub fn lightbox_click(&mut self, target: LightboxTarget) -> bool {
        self.lightbox.click(target)
    }
}
