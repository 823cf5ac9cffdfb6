//! The "No" button that runs away
//!
//! Every rejection bumps a counter. Scale, opacity, visibility and the message
//! are pure functions of that counter; only the position offset is random.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

/// Messages shown after each rejection, in order (the last one repeats)
pub const REJECTION_MESSAGES: [&str; 10] = [
    "Are you sure? 🥺",
    "Really? Think again!",
    "The button is running away!",
    "Come on, you know you want to say yes!",
    "I'll take that as a maybe!",
    "You're breaking my heart! 💔🥀",
    "Last chance to reconsider! ⏰",
    "Pretty please? 🙏😭",
    "What if I said... please?",
    "The yes button is looking pretty good right now! 👀",
];

/// Shown once the button has disappeared
pub const SURRENDER_MESSAGE: &str =
    "Fine! The 'No' button has given up! Now there's only one choice left... 👀👀👀";

/// Rejections before the button starts fading
pub const FADE_START: u32 = 5;
/// Rejections before the button disappears
pub const HIDE_AT: u32 = 8;

/// Gap kept between the button and the container's edge
const EDGE_PADDING: f32 = 20.0;
/// Total vertical travel of the jump
const VERTICAL_TRAVEL: f32 = 100.0;

/// Geometry of the button and its container, read from the page per rejection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvasionBounds {
    pub container_width: f32,
    pub button_width: f32,
}

impl EvasionBounds {
    fn max_dx(&self) -> f32 {
        (self.container_width - self.button_width - EDGE_PADDING).max(0.0)
    }
}

/// What the page applies to the button after each rejection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvasionDisplay {
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
    pub opacity: f32,
    pub visible: bool,
    pub message: &'static str,
}

impl EvasionDisplay {
    /// Untouched button: home position, full size, no message
    pub fn resting() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            scale: 1.0,
            opacity: 1.0,
            visible: true,
            message: "",
        }
    }

    /// CSS transform for the button
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.dx, self.dy, self.scale)
    }
}

pub fn scale_for(count: u32) -> f32 {
    (1.0 - 0.1 * count as f32).max(0.5)
}

pub fn opacity_for(count: u32) -> f32 {
    if count < FADE_START {
        1.0
    } else {
        (1.0 - 0.15 * (count - FADE_START) as f32).max(0.2)
    }
}

pub fn visible_for(count: u32) -> bool {
    count < HIDE_AT
}

pub fn message_for(count: u32) -> &'static str {
    if count == 0 {
        ""
    } else if !visible_for(count) {
        SURRENDER_MESSAGE
    } else {
        let index = ((count - 1) as usize).min(REJECTION_MESSAGES.len() - 1);
        REJECTION_MESSAGES[index]
    }
}

/// Tracks rejections of the question
pub struct EvasionController {
    count: u32,
    rng: Pcg32,
}

impl EvasionController {
    pub fn new(seed: u64) -> Self {
        Self {
            count: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Register one rejection and work out where the button goes next
    pub fn on_reject(&mut self, bounds: EvasionBounds) -> EvasionDisplay {
        self.count = self.count.saturating_add(1);

        let max_dx = bounds.max_dx();
        let dx = self.rng.random::<f32>() * max_dx - max_dx / 2.0;
        let dy = self.rng.random::<f32>() * VERTICAL_TRAVEL - VERTICAL_TRAVEL / 2.0;

        let count = self.count;
        if count == HIDE_AT {
            log::info!("No button gave up after {} rejections", count);
        } else {
            log::debug!("Rejection #{}", count);
        }

        EvasionDisplay {
            dx,
            dy,
            scale: scale_for(count),
            opacity: opacity_for(count),
            visible: visible_for(count),
            message: message_for(count),
        }
    }

    /// Back to a fresh question (called on every entry to the question screen)
    pub fn reset(&mut self) -> EvasionDisplay {
        self.count = 0;
        EvasionDisplay::resting()
    }
}
