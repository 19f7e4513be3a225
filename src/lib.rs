//! Road Rush - A cross-the-road arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (traffic, player, collisions, levels)
//! - `game`: Mode dispatch and the per-frame coordinator
//! - `menu`: Menu cursors, save browser and name entry
//! - `sessions`: Saved sessions on disk
//! - `settings`: Player preferences
//! - `audio`: Sound cues driven by game events
//! - `snapshot`: Read-only frame view for presentation

pub mod audio;
pub mod game;
pub mod menu;
pub mod sessions;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::Game;
pub use sessions::{SessionError, SessionRecord, SessionStore};
pub use settings::{RoadStyle, Settings};
pub use snapshot::FrameSnapshot;

/// Game configuration constants
pub mod consts {
    /// Logical screen size
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;
    /// Obstacles wrap at this x; the strip past it is HUD
    pub const ROAD_WIDTH: f32 = 1180.0;

    /// Player walk sheet
    pub const PLAYER_FRAME_WIDTH: f32 = 40.0;
    pub const PLAYER_FRAME_HEIGHT: f32 = 64.0;
    pub const PLAYER_FRAME_COUNT: u32 = 3;
    pub const PLAYER_FRAME_TIME: f32 = 0.1;
    pub const PLAYER_SCALE: f32 = 1.8;
    /// Level one walking speed (pixels/s)
    pub const PLAYER_BASE_SPEED: f32 = 200.0;
    /// Gap between the player's feet and the bottom edge at spawn
    pub const START_PAD_MARGIN: f32 = 10.0;
    /// Scoring re-arms once the player is this close to the bottom
    pub const REARM_MARGIN: f32 = 20.0;

    /// Explosion grows from the seed scale to the max over the duration
    pub const EXPLOSION_SEED_SCALE: f32 = 0.1;
    pub const EXPLOSION_MAX_SCALE: f32 = 0.4;
    pub const EXPLOSION_DURATION: f32 = 1.0;

    /// "Loading level" pause between levels (seconds)
    pub const INTERSTITIAL_SECONDS: f32 = 2.0;
    /// Points needed per level
    pub const POINTS_TO_NEXT_LEVEL: u32 = 1;

    /// Headless runner frame step
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest frame the simulation accepts (stalls are clamped to this)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
