//! Read-only frame view for presentation
//!
//! A renderer or test harness reads one [`FrameSnapshot`] per frame instead
//! of reaching into the live world. Everything is copied out so the snapshot
//! can outlive the borrow of the game.

use glam::Vec2;

use crate::game::Game;
use crate::sim::{Entity, Facing, GameMode, Interstitial, ObstacleKind, RoadType};

/// One sprite's placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteView {
    pub position: Vec2,
    /// On-screen size
    pub size: Vec2,
    pub frame: u32,
}

impl SpriteView {
    pub fn of(entity: &Entity) -> Self {
        Self {
            position: entity.position,
            size: entity.size(),
            frame: entity.frame_index(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub sprite: SpriteView,
    pub facing: Facing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleView {
    pub kind: ObstacleKind,
    pub sprite: SpriteView,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionView {
    pub position: Vec2,
    pub scale: f32,
}

/// One row of the save browser
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRow {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub save_time: String,
}

/// HUD and menu state
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub score: u32,
    pub level: u32,
    pub road: RoadType,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub mode: GameMode,
    pub hud: HudView,
    /// "Loading level N" overlay
    pub interstitial: Option<Interstitial>,
    /// `None` while the player is hidden behind an explosion
    pub player: Option<PlayerView>,
    pub obstacles: Vec<ObstacleView>,
    pub explosion: Option<ExplosionView>,
    /// Highlighted main menu row
    pub main_menu_selected: usize,
    /// Highlighted Options row
    pub options_selected: usize,
    /// Save-name field contents
    pub save_name: String,
    pub saves: Vec<SaveRow>,
    pub save_selected: usize,
    pub quit_requested: bool,
}

/// Copy the presentable state out of `game`
pub fn build_frame_snapshot(game: &Game) -> FrameSnapshot {
    let world = game.world();

    let player = world.player_visible.then(|| PlayerView {
        sprite: SpriteView::of(world.player.entity()),
        facing: world.player.facing(),
    });

    let obstacles = world
        .obstacles
        .iter()
        .map(|o| ObstacleView {
            kind: o.kind,
            sprite: SpriteView::of(&o.entity),
        })
        .collect();

    let explosion = world.explosion.is_active().then(|| ExplosionView {
        position: world.explosion.position(),
        scale: world.explosion.scale(),
    });

    let saves = game
        .browser()
        .entries()
        .iter()
        .map(|e| SaveRow {
            name: e.record.name.clone(),
            score: e.record.score,
            level: e.record.level,
            save_time: e.record.save_time.clone(),
        })
        .collect();

    FrameSnapshot {
        mode: game.mode(),
        hud: HudView {
            score: world.score(),
            level: world.level(),
            road: world.road,
        },
        interstitial: world.progression.interstitial(),
        player,
        obstacles,
        explosion,
        main_menu_selected: game.main_menu().cursor().selected(),
        options_selected: game.options_menu().cursor().selected(),
        save_name: game.name_entry().as_str().to_string(),
        saves,
        save_selected: game.browser().cursor().selected(),
        quit_requested: game.quit_requested(),
    }
}
