//! Playing-mode world state
//!
//! Everything the per-frame simulation touches lives in [`World`]. The world
//! never performs I/O; it reports what happened through [`GameEvent`]s that
//! the coordinator drains each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::explosion::ExplosionSequencer;
use super::level::RoadType;
use super::obstacles::{ObstacleError, ObstacleSet};
use super::player::PlayerController;
use super::progression::LevelProgressionController;

/// Notifications for the audio and presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Lane crossed, score went up
    Scored { score: u32 },
    /// Player hit; explosion started here
    Exploded { position: Vec2 },
    /// Interstitial for this level has started
    LevelLoading(u32),
    /// Traffic for this level is on the road
    LevelStarted(u32),
    Won,
    MenuMusic,
    TransitionMusic,
    Saved,
    Loaded,
    Deleted,
}

/// The simulation bundle driven while playing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: PlayerController,
    pub obstacles: ObstacleSet,
    pub explosion: ExplosionSequencer,
    pub progression: LevelProgressionController,
    /// Hidden while the explosion plays
    pub player_visible: bool,
    /// Set on a hit, cleared once the player respawns
    pub colliding: bool,
    /// Road the player picked in Options (used at level one)
    pub road_style: RoadType,
    /// Road currently on screen
    pub road: RoadType,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl World {
    pub fn new(screen_width: f32, screen_height: f32, road_width: f32, points_to_next_level: u32) -> Self {
        Self {
            player: PlayerController::new(screen_width, screen_height),
            obstacles: ObstacleSet::new(road_width),
            explosion: ExplosionSequencer::default(),
            progression: LevelProgressionController::new(points_to_next_level),
            player_visible: true,
            colliding: false,
            road_style: RoadType::Retro,
            road: RoadType::Retro,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn score(&self) -> u32 {
        self.player.score()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this frame's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Fresh run at level one on the chosen road
    pub fn reset(&mut self, road_style: RoadType) {
        self.player.reset();
        self.obstacles.clear();
        self.explosion.cancel();
        self.progression.reset();
        self.player_visible = true;
        self.colliding = false;
        self.road_style = road_style;
        self.road = road_style;
        self.time_ticks = 0;

        if let Err(e) = self.progression.start_level(1, &mut self.obstacles, &mut self.player) {
            log::warn!("Level 1 traffic not configured: {}", e);
        }
        log::info!("Game reset: level 1, score 0");
    }

    /// Rebuild the world as it would look at `level` with `score` points.
    ///
    /// Traffic is configured level by level so the road matches a run that
    /// actually got there. The rebuild happens on a copy, so on error the
    /// current run is left exactly as it was.
    pub fn restore(&mut self, score: u32, level: u32, road: RoadType) -> Result<(), ObstacleError> {
        let mut staged = self.clone();
        staged.reset(self.road_style);
        for l in 2..=level {
            staged
                .progression
                .start_level(l, &mut staged.obstacles, &mut staged.player)?;
        }
        staged.progression.set_level(level);
        staged.player.set_score(score);
        staged.road = road;
        *self = staged;
        Ok(())
    }

    /// Apply a finished interstitial: new traffic, faster everything, new road
    pub fn begin_level(&mut self, level: u32) {
        match self
            .progression
            .start_level(level, &mut self.obstacles, &mut self.player)
        {
            Ok(()) => {
                self.road = RoadType::for_level(level, self.road_style);
                self.emit(GameEvent::LevelStarted(level));
            }
            Err(e) => log::warn!("Level {} traffic not configured: {}", level, e),
        }
    }

    /// Whether collisions are being tested this frame
    pub fn collisions_armed(&self) -> bool {
        self.player_visible && !self.explosion.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_world() -> World {
        let mut world = World::new(1920.0, 1080.0, 1180.0, 1);
        world.reset(RoadType::Retro);
        world
    }

    #[test]
    fn test_restore_rebuilds_level_traffic() {
        let mut world = test_world();
        world.restore(1, 2, RoadType::Level2).unwrap();
        assert_eq!(world.level(), 2);
        assert_eq!(world.score(), 1);
        assert_eq!(world.road, RoadType::Level2);
        assert_eq!(world.obstacles.len(), 5);
    }

    #[test]
    fn test_failed_restore_keeps_current_run() {
        let mut world = test_world();
        world.restore(1, 2, RoadType::Level2).unwrap();
        let positions = world.obstacles.positions();
        let speeds = world.obstacles.speeds();
        let player_speed = world.player.speed();

        // Levels 2 and 3 configure before the unknown level fails
        assert_eq!(
            world.restore(5, 4, RoadType::Level3),
            Err(ObstacleError::UnknownLevel(4))
        );

        assert_eq!(world.level(), 2);
        assert_eq!(world.score(), 1);
        assert_eq!(world.road, RoadType::Level2);
        assert_eq!(world.obstacles.positions(), positions);
        assert_eq!(world.obstacles.speeds(), speeds);
        assert_eq!(world.player.speed(), player_speed);
    }
}
