//! Screen navigation and keyboard shortcuts

/// The page's screens, one visible at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Question,
    Celebration,
    Game,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Landing,
        Screen::Question,
        Screen::Celebration,
        Screen::Game,
    ];

    /// DOM id of the screen's section
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Question => "question",
            Screen::Celebration => "celebration",
            Screen::Game => "game",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

/// Result of a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenChange {
    pub from: Screen,
    pub to: Screen,
}

impl ScreenChange {
    /// Entering (or re-entering) the question resets the No button
    pub fn entered_question(&self) -> bool {
        self.to == Screen::Question
    }
}

#[derive(Debug)]
pub struct ScreenNavigator {
    current: Screen,
}

impl Default for ScreenNavigator {
    fn default() -> Self {
        Self {
            current: Screen::Landing,
        }
    }
}

impl ScreenNavigator {
    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn show(&mut self, screen: Screen) -> ScreenChange {
        let change = ScreenChange {
            from: self.current,
            to: screen,
        };
        self.current = screen;
        log::info!("Screen {:?} -> {:?}", change.from, change.to);
        change
    }
}

/// Keyboard shortcuts, each bound to one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Enter on the landing screen
    Proceed,
    /// Y on the question screen
    Accept,
}

impl KeyCommand {
    pub fn from_key(current: Screen, key: &str) -> Option<Self> {
        match current {
            Screen::Landing if key == "Enter" => Some(KeyCommand::Proceed),
            Screen::Question if key.eq_ignore_ascii_case("y") => Some(KeyCommand::Accept),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_landing() {
        assert_eq!(ScreenNavigator::default().current(), Screen::Landing);
    }

    #[test]
    fn test_show_reports_change() {
        let mut nav = ScreenNavigator::default();
        let change = nav.show(Screen::Question);
        assert_eq!(change.from, Screen::Landing);
        assert!(change.entered_question());

        // Re-entry counts too
        let change = nav.show(Screen::Question);
        assert!(change.entered_question());

        let change = nav.show(Screen::Celebration);
        assert!(!change.entered_question());
        assert_eq!(nav.current(), Screen::Celebration);
    }

    #[test]
    fn test_ids_round_trip() {
        for screen in Screen::ALL {
            assert_eq!(Screen::from_id(screen.id()), Some(screen));
        }
        assert_eq!(Screen::from_id("nope"), None);
    }

    #[test]
    fn test_shortcuts_bound_to_screen() {
        assert_eq!(
            KeyCommand::from_key(Screen::Landing, "Enter"),
            Some(KeyCommand::Proceed)
        );
        assert_eq!(KeyCommand::from_key(Screen::Landing, "y"), None);
        assert_eq!(
            KeyCommand::from_key(Screen::Question, "Y"),
            Some(KeyCommand::Accept)
        );
        assert_eq!(KeyCommand::from_key(Screen::Question, "Enter"), None);
        assert_eq!(KeyCommand::from_key(Screen::Celebration, "y"), None);
    }
}
