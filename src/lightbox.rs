//! Full-screen image viewer

/// Where a click inside the open lightbox landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxTarget {
    /// The dimmed area around the image
    Backdrop,
    CloseButton,
    Image,
}

#[derive(Debug, Default)]
pub struct Lightbox {
    src: Option<String>,
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        self.src.is_some()
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Page scrolling is locked while the lightbox is open
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn open(&mut self, src: impl Into<String>) {
        self.src = Some(src.into());
    }

    /// Returns true if the click closed the lightbox
    pub fn click(&mut self, target: LightboxTarget) -> bool {
        match target {
            LightboxTarget::Backdrop | LightboxTarget::CloseButton if self.is_open() => {
                self.src = None;
                true
            }
            _ => false,
        }
    }
}
