//! # Navigation
//!
//! Three screens, fully connected, no guards. `Top` is where the app starts.

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Top,
    History,
    Flow,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Top, Screen::History, Screen::Flow];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Top => "Top",
            Screen::History => "History",
            Screen::Flow => "Exchange",
        }
    }

    /// Global hotkey that jumps to this screen.
    pub fn hotkey(&self) -> char {
        match self {
            Screen::Top => 't',
            Screen::History => 'h',
            Screen::Flow => 'f',
        }
    }

    pub fn from_hotkey(c: char) -> Option<Screen> {
        Screen::ALL.into_iter().find(|s| s.hotkey() == c)
    }
}

#[derive(Debug, Default)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Switch to `target`. Returns whether the screen actually changed.
    pub fn navigate(&mut self, target: Screen) -> bool {
        if self.current == target {
            return false;
        }
        debug!("Navigate {:?} -> {:?}", self.current, target);
        self.current = target;
        true
    }
}
