//! Top-level mode selector

use serde::{Deserialize, Serialize};

/// Which screen is active. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen with the main menu
    #[default]
    MainMenu,
    /// Crossing the road (includes the between-level interstitial)
    Playing,
    Paused,
    /// Road style picker
    Options,
    About,
    HowToPlay,
    /// Typing a name for a new save
    Saving,
    /// Browsing saved sessions
    Loading,
    /// Final level cleared
    Won,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::MainMenu => "MainMenu",
            GameMode::Playing => "Playing",
            GameMode::Paused => "Paused",
            GameMode::Options => "Options",
            GameMode::About => "About",
            GameMode::HowToPlay => "HowToPlay",
            GameMode::Saving => "Saving",
            GameMode::Loading => "Loading",
            GameMode::Won => "Won",
        }
    }

    /// Where Back leads from this mode. `None` on the main menu, where Back quits.
    pub fn parent(&self) -> Option<GameMode> {
        match self {
            GameMode::MainMenu => None,
            GameMode::Saving => Some(GameMode::Paused),
            GameMode::Playing
            | GameMode::Paused
            | GameMode::Options
            | GameMode::About
            | GameMode::HowToPlay
            | GameMode::Loading
            | GameMode::Won => Some(GameMode::MainMenu),
        }
    }
}

/// Holds the active mode and nothing else
#[derive(Debug, Clone, Default)]
pub struct GameStateMachine {
    mode: GameMode,
}

impl GameStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is(&self, mode: GameMode) -> bool {
        self.mode == mode
    }

    /// Switch modes, returning the mode that was left
    pub fn switch(&mut self, to: GameMode) -> GameMode {
        let from = self.mode;
        if from != to {
            log::debug!("Mode {} -> {}", from.as_str(), to.as_str());
        }
        self.mode = to;
        from
    }
}
