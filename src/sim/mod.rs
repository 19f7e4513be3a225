//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through the `dt` handed to each tick
//! - Stable iteration order (obstacle insertion order)
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod entity;
pub mod explosion;
pub mod input;
pub mod level;
pub mod mode;
pub mod obstacles;
pub mod player;
pub mod progression;
pub mod state;
pub mod tick;

pub use collision::{Hit, first_hit, intersects};
pub use entity::{Aabb, Animation, Entity, Facing, SpriteSheet};
pub use explosion::ExplosionSequencer;
pub use input::{Button, ButtonSet, FrameInput, InputSnapshot, InputTracker};
pub use level::{LevelConfig, MAX_LEVEL, ObstacleKind, ObstacleSpec, RoadType, level_config};
pub use mode::{GameMode, GameStateMachine};
pub use obstacles::{Obstacle, ObstacleError, ObstacleSet};
pub use player::{Movement, PlayerController, PlayerStep};
pub use progression::{Interstitial, LevelProgressionController, Progress, should_advance};
pub use state::{GameEvent, World};
pub use tick::{TickOutcome, tick};
