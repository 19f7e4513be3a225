//! Road traffic: the set of obstacles the player has to dodge

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::level::{LevelConfig, ObstacleKind, ObstacleSpec, level_config};

/// Errors from bulk obstacle operations. All of them leave the set untouched.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ObstacleError {
    #[error("expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("no usable sprite for {0:?} obstacle")]
    MissingSprite(ObstacleKind),
    #[error("level {0} has no configuration")]
    UnknownLevel(u32),
}

/// One piece of traffic and its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub entity: Entity,
}

impl Obstacle {
    /// Create from a table row; `None` if the sprite is unusable
    pub fn from_spec(spec: &ObstacleSpec) -> Option<Self> {
        Entity::from_sheet(&spec.sheet, spec.position, spec.direction, spec.speed, spec.scale)
            .map(|entity| Self {
                kind: spec.kind,
                entity,
            })
    }
}

/// Active obstacles in insertion order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
    /// Rightward traffic wraps once it passes this x; leftward traffic re-enters here
    right_bound: f32,
}

impl ObstacleSet {
    pub fn new(right_bound: f32) -> Self {
        Self {
            obstacles: Vec::new(),
            right_bound,
        }
    }

    pub fn right_bound(&self) -> f32 {
        self.right_bound
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn count_kind(&self, kind: ObstacleKind) -> usize {
        self.obstacles.iter().filter(|o| o.kind == kind).count()
    }

    /// Whether the given level's traffic is already on the road
    pub fn has_level(&self, level: u32) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.kind.introduced_at() == level)
    }

    /// Add a single obstacle from a table row
    pub fn spawn(&mut self, spec: &ObstacleSpec) -> Result<(), ObstacleError> {
        let obstacle = Obstacle::from_spec(spec).ok_or(ObstacleError::MissingSprite(spec.kind))?;
        self.obstacles.push(obstacle);
        Ok(())
    }

    /// Move every obstacle, wrap it around the road and step its animation
    pub fn update(&mut self, dt: f32) {
        let right_bound = self.right_bound;
        for obstacle in &mut self.obstacles {
            let e = &mut obstacle.entity;
            e.advance(dt);

            let width = e.width();
            if e.direction.x > 0.0 && e.position.x > right_bound {
                e.position.x = -width;
            } else if e.direction.x < 0.0 && e.position.x < -width {
                e.position.x = right_bound;
            }

            if let Some(anim) = e.animation.as_mut() {
                anim.advance(dt);
            }
        }
    }

    /// Add `delta` to every obstacle's speed
    pub fn increase_speed(&mut self, delta: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.entity.boost(delta);
        }
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Remove every obstacle of `kind`, returning how many went
    pub fn retire(&mut self, kind: ObstacleKind) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.kind != kind);
        before - self.obstacles.len()
    }

    /// Apply a level's composition rules.
    ///
    /// Returns `Ok(false)` when the level's traffic is already present. On error
    /// nothing has been changed.
    pub fn configure_for_level(&mut self, level: u32) -> Result<bool, ObstacleError> {
        let config = level_config(level).ok_or(ObstacleError::UnknownLevel(level))?;
        self.apply(config)
    }

    fn apply(&mut self, config: &LevelConfig) -> Result<bool, ObstacleError> {
        if self.has_level(config.level) {
            return Ok(false);
        }

        // Build everything up front so a bad sprite leaves the road as it was
        let spawned = config
            .spawns
            .iter()
            .map(|spec| Obstacle::from_spec(spec).ok_or(ObstacleError::MissingSprite(spec.kind)))
            .collect::<Result<Vec<_>, _>>()?;

        for kind in config.retire {
            let removed = self.retire(*kind);
            log::debug!("Retired {} {:?} obstacle(s)", removed, kind);
        }

        self.obstacles.extend(spawned);

        for obstacle in &mut self.obstacles {
            if config.reverse.contains(&obstacle.kind) {
                obstacle.entity.reverse();
                obstacle.entity.boost(config.reverse_boost);
            }
        }

        log::info!(
            "Level {} traffic configured ({} obstacles)",
            config.level,
            self.obstacles.len()
        );
        Ok(true)
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.obstacles.iter().map(|o| o.entity.position).collect()
    }

    pub fn speeds(&self) -> Vec<f32> {
        self.obstacles.iter().map(|o| o.entity.speed).collect()
    }

    /// Restore positions in insertion order; the list must match the set
    pub fn restore_positions(&mut self, positions: &[Vec2]) -> Result<(), ObstacleError> {
        self.check_len(positions.len())?;
        for (obstacle, pos) in self.obstacles.iter_mut().zip(positions) {
            obstacle.entity.position = *pos;
        }
        Ok(())
    }

    /// Restore speeds in insertion order; the list must match the set
    pub fn restore_speeds(&mut self, speeds: &[f32]) -> Result<(), ObstacleError> {
        self.check_len(speeds.len())?;
        for (obstacle, speed) in self.obstacles.iter_mut().zip(speeds) {
            obstacle.entity.speed = speed.max(0.0);
        }
        Ok(())
    }

    fn check_len(&self, got: usize) -> Result<(), ObstacleError> {
        if got != self.obstacles.len() {
            return Err(ObstacleError::LengthMismatch {
                expected: self.obstacles.len(),
                got,
            });
        }
        Ok(())
    }
}
