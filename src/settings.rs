//! Game settings and preferences
//!
//! Persisted separately from session saves as a small JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{POINTS_TO_NEXT_LEVEL, ROAD_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::RoadType;

/// Road look chosen in the Options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoadStyle {
    #[default]
    Retro,
    Modern,
}

impl RoadStyle {
    pub const ALL: [RoadStyle; 2] = [RoadStyle::Retro, RoadStyle::Modern];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoadStyle::Retro => "Retro",
            RoadStyle::Modern => "Modern",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "retro" => Some(RoadStyle::Retro),
            "modern" => Some(RoadStyle::Modern),
            _ => None,
        }
    }

    /// Level-one road for this style
    pub fn road_type(&self) -> RoadType {
        match self {
            RoadStyle::Retro => RoadType::Retro,
            RoadStyle::Modern => RoadType::Modern,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Road look for level one
    pub road_style: RoadStyle,

    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Obstacles wrap once they pass this x
    pub road_width: f32,
    /// Points needed to clear each level
    pub points_to_next_level: u32,

    // === Storage ===
    /// Directory holding session saves
    pub save_dir: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            road_style: RoadStyle::Retro,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            road_width: ROAD_WIDTH,
            points_to_next_level: POINTS_TO_NEXT_LEVEL,

            save_dir: PathBuf::from("Saves"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "road_rush_settings.json";

    /// Load settings from `path`, falling back to defaults if it's missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Clamp out-of-range values read from disk
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.points_to_next_level = self.points_to_next_level.max(1);
        if !(self.road_width > 0.0) {
            self.road_width = ROAD_WIDTH;
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            self.screen_width = SCREEN_WIDTH;
            self.screen_height = SCREEN_HEIGHT;
        }
        self
    }

    /// Effective effect volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_road_style_names() {
        for style in RoadStyle::ALL {
            assert_eq!(RoadStyle::from_str(style.as_str()), Some(style));
        }
        assert_eq!(RoadStyle::from_str("MODERN"), Some(RoadStyle::Modern));
        assert_eq!(RoadStyle::from_str("level2"), None);
        assert_eq!(RoadStyle::Modern.road_type(), RoadType::Modern);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        let mut settings = Settings::default();
        settings.road_style = RoadStyle::Modern;
        settings.muted = true;
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        std::fs::write(&path, "road_style = retro").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults_and_clamps() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(Settings::FILE_NAME);
        std::fs::write(&path, r#"{"road_style": "Modern", "master_volume": 3.0, "points_to_next_level": 0}"#)
            .unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.road_style, RoadStyle::Modern);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.points_to_next_level, 1);
        assert_eq!(settings.road_width, ROAD_WIDTH);
    }

    #[test]
    fn test_mute_zeroes_volumes() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
        assert!(Settings::default().effective_music_volume() > 0.0);
    }
}
