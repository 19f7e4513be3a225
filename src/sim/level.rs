//! Data-driven level table
//!
//! Each level lists the traffic it spawns, the traffic it retires, the
//! traffic whose direction it flips on entry, and the difficulty bump applied
//! once the level starts. Obstacles carry an explicit [`ObstacleKind`] so the
//! table can address them without inspecting asset names.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::SpriteSheet;

/// Highest level; clearing it wins the game
pub const MAX_LEVEL: u32 = 3;

/// Category tag attached to every obstacle at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Level-one cars that stay on the road for the whole run
    Traffic,
    /// Level-one cars replaced by oncoming traffic at level two
    SwappedTraffic,
    /// Cars driving left-to-right, introduced at level two
    Oncoming,
    /// Fast car that only exists during level two
    Express,
    /// Animated critters introduced at level three
    Creature,
}

impl ObstacleKind {
    /// Level whose configuration spawns this kind
    pub fn introduced_at(self) -> u32 {
        match self {
            ObstacleKind::Traffic | ObstacleKind::SwappedTraffic => 1,
            ObstacleKind::Oncoming | ObstacleKind::Express => 2,
            ObstacleKind::Creature => 3,
        }
    }
}

/// Background variant; identifies the road art for a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoadType {
    Retro,
    Modern,
    Level2,
    Level3,
    /// Plain road; also what unrecognised names decode to
    #[default]
    #[serde(other)]
    Default,
}

impl RoadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadType::Default => "Default",
            RoadType::Retro => "Retro",
            RoadType::Modern => "Modern",
            RoadType::Level2 => "Level2",
            RoadType::Level3 => "Level3",
        }
    }

    /// Road shown at `level` when the player picked `style` in Options
    pub fn for_level(level: u32, style: RoadType) -> Self {
        match level {
            0 | 1 => style,
            2 => RoadType::Level2,
            _ => RoadType::Level3,
        }
    }
}

/// One obstacle row in the level table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    pub sheet: SpriteSheet,
    pub position: Vec2,
    pub scale: Vec2,
    pub speed: f32,
    pub direction: Vec2,
}

/// Everything that changes when a level starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub level: u32,
    /// Obstacles added on entry
    pub spawns: &'static [ObstacleSpec],
    /// Kinds removed before spawning
    pub retire: &'static [ObstacleKind],
    /// Kinds whose direction is flipped on entry
    pub reverse: &'static [ObstacleKind],
    /// Speed added to each reversed obstacle
    pub reverse_boost: f32,
    /// Speed added to every obstacle once the level starts
    pub speed_delta: f32,
    pub player_speed: f32,
}

const CAR_WIDE: SpriteSheet = SpriteSheet::still(320.0, 160.0);
const CAR_COMPACT: SpriteSheet = SpriteSheet::still(150.0, 75.0);
const CAR_EXPRESS: SpriteSheet = SpriteSheet::still(560.0, 280.0);
const CREATURE: SpriteSheet = SpriteSheet::strip(128.0, 96.0, 4, 0.1);

const SPAWN_RIGHT: f32 = 1180.0;
const SPAWN_LEFT: f32 = -200.0;

const LEVEL_1_SPAWNS: [ObstacleSpec; 4] = [
    ObstacleSpec {
        kind: ObstacleKind::Traffic,
        sheet: CAR_WIDE,
        position: Vec2::new(SPAWN_RIGHT, 100.0),
        scale: Vec2::new(0.4, 0.5),
        speed: 350.0,
        direction: Vec2::NEG_X,
    },
    ObstacleSpec {
        kind: ObstacleKind::SwappedTraffic,
        sheet: CAR_COMPACT,
        position: Vec2::new(SPAWN_RIGHT, 230.0),
        scale: Vec2::new(0.9, 1.05),
        speed: 280.0,
        direction: Vec2::NEG_X,
    },
    ObstacleSpec {
        kind: ObstacleKind::Traffic,
        sheet: CAR_COMPACT,
        position: Vec2::new(SPAWN_RIGHT, 360.0),
        scale: Vec2::new(0.9, 1.1),
        speed: 350.0,
        direction: Vec2::NEG_X,
    },
    ObstacleSpec {
        kind: ObstacleKind::SwappedTraffic,
        sheet: CAR_WIDE,
        position: Vec2::new(SPAWN_RIGHT, 500.0),
        scale: Vec2::new(0.4, 0.5),
        speed: 550.0,
        direction: Vec2::NEG_X,
    },
];

// Oncoming cars spawn heading left and are flipped (+300) on level entry,
// ending up at 520 and 380 heading right.
const LEVEL_2_SPAWNS: [ObstacleSpec; 3] = [
    ObstacleSpec {
        kind: ObstacleKind::Oncoming,
        sheet: CAR_COMPACT,
        position: Vec2::new(SPAWN_LEFT, 570.0),
        scale: Vec2::new(0.9, 1.1),
        speed: 220.0,
        direction: Vec2::NEG_X,
    },
    ObstacleSpec {
        kind: ObstacleKind::Oncoming,
        sheet: CAR_WIDE,
        position: Vec2::new(SPAWN_LEFT, 500.0),
        scale: Vec2::new(0.28, 0.3),
        speed: 80.0,
        direction: Vec2::NEG_X,
    },
    ObstacleSpec {
        kind: ObstacleKind::Express,
        sheet: CAR_EXPRESS,
        position: Vec2::new(SPAWN_RIGHT, 220.0),
        scale: Vec2::new(0.23, 0.23),
        speed: 720.0,
        direction: Vec2::NEG_X,
    },
];

const LEVEL_3_SPAWNS: [ObstacleSpec; 2] = [
    ObstacleSpec {
        kind: ObstacleKind::Creature,
        sheet: CREATURE,
        position: Vec2::new(SPAWN_RIGHT, 0.0),
        scale: Vec2::new(0.6, 0.6),
        speed: 400.0,
        direction: Vec2::NEG_X,
    },
    ObstacleSpec {
        kind: ObstacleKind::Creature,
        sheet: CREATURE,
        position: Vec2::new(SPAWN_RIGHT, 180.0),
        scale: Vec2::new(1.0, 1.1),
        speed: 550.0,
        direction: Vec2::NEG_X,
    },
];

static LEVELS: [LevelConfig; MAX_LEVEL as usize] = [
    LevelConfig {
        level: 1,
        spawns: &LEVEL_1_SPAWNS,
        retire: &[],
        reverse: &[],
        reverse_boost: 0.0,
        speed_delta: 0.0,
        player_speed: 200.0,
    },
    LevelConfig {
        level: 2,
        spawns: &LEVEL_2_SPAWNS,
        retire: &[ObstacleKind::SwappedTraffic],
        reverse: &[ObstacleKind::Oncoming],
        reverse_boost: 300.0,
        speed_delta: 50.0,
        player_speed: 220.0,
    },
    LevelConfig {
        level: 3,
        spawns: &LEVEL_3_SPAWNS,
        retire: &[ObstacleKind::Express],
        reverse: &[],
        reverse_boost: 0.0,
        speed_delta: 100.0,
        player_speed: 270.0,
    },
];

/// Look up the configuration for `level` (1-based)
pub fn level_config(level: u32) -> Option<&'static LevelConfig> {
    level
        .checked_sub(1)
        .and_then(|i| LEVELS.get(i as usize))
}
