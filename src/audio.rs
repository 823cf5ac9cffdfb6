//! Background music and the celebration sound
//!
//! `MusicState` is the play/pause/unlock bookkeeping and runs anywhere.
//! `AudioManager` (wasm only) drives the page's `<audio>` elements. Browsers may
//! refuse playback until a user gesture; those refusals are logged and dropped,
//! they never reach game or evasion state.

/// Default background music volume
pub const MUSIC_VOLUME: f32 = 0.6;

/// What the page should do with the music element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
}

#[derive(Debug, Clone)]
pub struct MusicState {
    playing: bool,
    /// The current play request came from page-load autoplay
    autoplay_pending: bool,
    /// Autoplay was refused; the next gesture on the page retries it
    retry_on_gesture: bool,
    volume: f32,
}

impl Default for MusicState {
    fn default() -> Self {
        Self::new(MUSIC_VOLUME)
    }
}

impl MusicState {
    pub fn new(volume: f32) -> Self {
        Self {
            playing: false,
            autoplay_pending: false,
            retry_on_gesture: false,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// A refused autoplay is waiting for a user gesture
    pub fn awaiting_gesture(&self) -> bool {
        self.retry_on_gesture
    }

    /// Music button pressed. Playing is assumed until told otherwise.
    /// An explicit choice cancels any autoplay retry.
    pub fn toggle(&mut self) -> MusicCommand {
        self.autoplay_pending = false;
        self.retry_on_gesture = false;
        if self.playing {
            self.playing = false;
            MusicCommand::Pause
        } else {
            self.playing = true;
            MusicCommand::Play
        }
    }

    /// Start the music if it is not already on
    pub fn ensure_playing(&mut self) -> Option<MusicCommand> {
        if self.playing {
            None
        } else {
            self.playing = true;
            Some(MusicCommand::Play)
        }
    }

    /// Page-load autoplay attempt
    pub fn autoplay(&mut self) -> Option<MusicCommand> {
        let command = self.ensure_playing();
        if command.is_some() {
            self.autoplay_pending = true;
        }
        command
    }

    /// Any gesture on the page: retry a refused autoplay, once per refusal
    pub fn gesture_retry(&mut self) -> Option<MusicCommand> {
        if !self.retry_on_gesture || self.playing {
            return None;
        }
        self.retry_on_gesture = false;
        self.autoplay()
    }

    pub fn play_succeeded(&mut self) {
        self.playing = true;
        self.autoplay_pending = false;
        self.retry_on_gesture = false;
    }

    /// Playback was refused (autoplay policy) or aborted by a pause
    pub fn play_blocked(&mut self) {
        self.playing = false;
        if self.autoplay_pending {
            self.autoplay_pending = false;
            self.retry_on_gesture = true;
        }
    }

    /// Icon and caption for the music button
    pub fn label(&self) -> (&'static str, &'static str) {
        if self.playing {
            ("🔊", "Pause Music")
        } else {
            ("🔇", "Play Music")
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    /// Audio manager for the page's two `<audio>` elements
    #[derive(Clone)]
    pub struct AudioManager {
        music: HtmlAudioElement,
        yes_sound: HtmlAudioElement,
    }

    impl AudioManager {
        pub fn new(music: HtmlAudioElement, yes_sound: HtmlAudioElement, volume: f32) -> Self {
            music.set_volume(volume as f64);
            Self { music, yes_sound }
        }

        /// Start the music; `done` receives whether the browser allowed it
        pub fn play_music(&self, done: impl FnOnce(bool) + 'static) {
            play(&self.music, "music", done);
        }

        pub fn pause_music(&self) {
            if let Err(e) = self.music.pause() {
                log::debug!("Pause failed: {:?}", e);
            }
        }

        /// One-shot celebration sound
        pub fn play_yes(&self) {
            play(&self.yes_sound, "yes sound", |_| {});
        }
    }

    fn play(el: &HtmlAudioElement, what: &'static str, done: impl FnOnce(bool) + 'static) {
        let promise = match el.play() {
            Ok(p) => p,
            Err(e) => {
                log::debug!("Could not play {}: {:?}", what, e);
                done(false);
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            let result: Result<JsValue, JsValue> = JsFuture::from(promise).await;
            match result {
                Ok(_) => done(true),
                Err(e) => {
                    log::debug!("Playback of {} blocked: {:?}", what, e);
                    done(false);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut music = MusicState::default();
        assert!(!music.is_playing());
        assert_eq!(music.label(), ("🔇", "Play Music"));

        assert_eq!(music.toggle(), MusicCommand::Play);
        assert!(music.is_playing());
        assert_eq!(music.label(), ("🔊", "Pause Music"));

        assert_eq!(music.toggle(), MusicCommand::Pause);
        assert!(!music.is_playing());
    }

    #[test]
    fn test_blocked_autoplay_waits_for_gesture() {
        let mut music = MusicState::default();
        assert_eq!(music.autoplay(), Some(MusicCommand::Play));
        music.play_blocked();
        assert!(!music.is_playing());
        assert!(music.awaiting_gesture());

        assert_eq!(music.gesture_retry(), Some(MusicCommand::Play));
        assert!(music.is_playing());
        // Only one retry per refusal
        assert_eq!(music.gesture_retry(), None);

        music.play_succeeded();
        assert!(!music.awaiting_gesture());
        assert_eq!(music.ensure_playing(), None);
    }

    #[test]
    fn test_refused_retry_rearms() {
        let mut music = MusicState::default();
        music.autoplay();
        music.play_blocked();
        music.gesture_retry();
        music.play_blocked();
        assert_eq!(music.gesture_retry(), Some(MusicCommand::Play));
    }

    #[test]
    fn test_gesture_without_autoplay_does_nothing() {
        let mut music = MusicState::default();
        assert_eq!(music.gesture_retry(), None);
        assert!(!music.is_playing());

        // A refused explicit play is not retried either
        music.ensure_playing();
        music.play_blocked();
        assert_eq!(music.gesture_retry(), None);
    }

    #[test]
    fn test_pause_while_autoplay_pending_stays_paused() {
        let mut music = MusicState::default();
        assert_eq!(music.autoplay(), Some(MusicCommand::Play));
        assert_eq!(music.toggle(), MusicCommand::Pause);
        // The same click reaches the page-wide gesture handler
        assert_eq!(music.gesture_retry(), None);

        // The pause aborts the pending play
        music.play_blocked();
        assert!(!music.awaiting_gesture());
        assert_eq!(music.gesture_retry(), None);
        assert!(!music.is_playing());
    }

    #[test]
    fn test_toggle_cancels_retry() {
        let mut music = MusicState::default();
        music.autoplay();
        music.play_blocked();
        assert_eq!(music.toggle(), MusicCommand::Play);
        assert!(!music.awaiting_gesture());
        assert_eq!(music.gesture_retry(), None);
    }

    #[test]
    fn test_volume_clamped() {
        assert_eq!(MusicState::new(3.0).volume(), 1.0);
        assert_eq!(MusicState::default().volume(), MUSIC_VOLUME);
    }
}
