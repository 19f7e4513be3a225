//! The player: movement, clamping, lane scoring and respawn

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Animation, Entity, Facing, SpriteSheet};
use crate::consts::*;

/// Held movement axes for one frame. Diagonals are allowed and not normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// What a player update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    Moved,
    /// Crossed the finish line; score went up and the player is back on the start pad
    Scored,
}

/// Owns the single player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerController {
    entity: Entity,
    score: u32,
    /// Cleared when a lane is completed, re-armed in the bottom band
    can_score: bool,
    facing: Facing,
    screen: Vec2,
}

impl PlayerController {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        let sheet = SpriteSheet::strip(
            PLAYER_FRAME_WIDTH,
            PLAYER_FRAME_HEIGHT,
            PLAYER_FRAME_COUNT,
            PLAYER_FRAME_TIME,
        );
        let entity = Entity {
            position: Vec2::ZERO,
            direction: Vec2::ZERO,
            speed: PLAYER_BASE_SPEED,
            scale: Vec2::splat(PLAYER_SCALE),
            frame_size: Vec2::new(sheet.frame_width, sheet.frame_height),
            animation: Some(Animation::new(sheet.frame_count, sheet.frame_duration)),
        };
        let mut player = Self {
            entity,
            score: 0,
            can_score: true,
            facing: Facing::Right,
            screen: Vec2::new(screen_width, screen_height),
        };
        player.reset_position();
        player
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn position(&self) -> Vec2 {
        self.entity.position
    }

    pub fn bounds(&self) -> Aabb {
        self.entity.bounds()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn can_score(&self) -> bool {
        self.can_score
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn speed(&self) -> f32 {
        self.entity.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.entity.speed = speed.max(0.0);
    }

    /// Top-left corner of the start pad
    pub fn start_position(&self) -> Vec2 {
        let size = self.entity.size();
        Vec2::new(
            (self.screen.x - size.x) / 2.0,
            self.screen.y - size.y - START_PAD_MARGIN,
        )
    }

    pub fn reset_position(&mut self) {
        self.entity.position = self.start_position();
    }

    /// Back to a fresh run: start pad, zero score, base speed
    pub fn reset(&mut self) {
        self.score = 0;
        self.can_score = true;
        self.facing = Facing::Right;
        self.entity.speed = PLAYER_BASE_SPEED;
        if let Some(anim) = self.entity.animation.as_mut() {
            anim.rewind();
        }
        self.reset_position();
    }

    /// Apply one frame of movement input
    pub fn update(&mut self, movement: Movement, dt: f32) -> PlayerStep {
        let step = self.entity.speed * dt;
        let mut next = self.entity.position;
        let mut walking = false;

        if movement.up {
            next.y -= step;
        }
        if movement.left {
            next.x -= step;
            walking = true;
            self.facing = Facing::Left;
        }
        if movement.right {
            next.x += step;
            walking = true;
            self.facing = Facing::Right;
        }
        if movement.down {
            next.y += step;
        }

        if let Some(anim) = self.entity.animation.as_mut() {
            if walking {
                anim.advance(dt);
            } else {
                anim.rewind();
            }
        }

        let size = self.entity.size();
        next.x = next.x.clamp(0.0, (self.screen.x - size.x).max(0.0));

        if next.y < -self.entity.frame_size.y && self.can_score {
            self.score += 1;
            self.can_score = false;
            self.reset_position();
            return PlayerStep::Scored;
        }

        if next.y >= self.screen.y - size.y - REARM_MARGIN {
            self.can_score = true;
        }
        next.y = next.y.min(self.screen.y - size.y - START_PAD_MARGIN);

        self.entity.position = next;
        PlayerStep::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const UP: Movement = Movement {
        up: true,
        down: false,
        left: false,
        right: false,
    };

    fn player() -> PlayerController {
        PlayerController::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_starts_on_pad() {
        let p = player();
        let size = p.entity().size();
        assert_eq!(p.position().x, (SCREEN_WIDTH - size.x) / 2.0);
        assert_eq!(p.position().y, SCREEN_HEIGHT - size.y - START_PAD_MARGIN);
        assert!(p.can_score());
    }

    #[test]
    fn test_crossing_scores_once_and_respawns() {
        let mut p = player();
        p.entity.position.y = -60.0;
        assert_eq!(p.update(UP, 0.1), PlayerStep::Scored);
        assert_eq!(p.score(), 1);
        assert!(!p.can_score());
        assert_eq!(p.position(), p.start_position());
    }

    #[test]
    fn test_no_rescore_until_bottom_band() {
        let mut p = player();
        p.entity.position.y = -60.0;
        p.update(UP, 0.1);
        assert_eq!(p.score(), 1);

        // Above the finish line again without touching the bottom band
        p.entity.position.y = -60.0;
        assert_eq!(p.update(UP, 0.1), PlayerStep::Moved);
        assert_eq!(p.score(), 1);
        assert!(!p.can_score());

        // Back in the bottom band re-arms scoring
        p.entity.position = p.start_position();
        p.update(Movement::default(), 0.1);
        assert!(p.can_score());
        p.entity.position.y = -60.0;
        assert_eq!(p.update(UP, 0.1), PlayerStep::Scored);
        assert_eq!(p.score(), 2);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut p = player();
        p.entity.position = Vec2::new(500.0, 500.0);
        let diagonal = Movement {
            up: true,
            right: true,
            ..Default::default()
        };
        p.update(diagonal, 0.5);
        assert_eq!(p.position(), Vec2::new(600.0, 400.0));
    }

    #[test]
    fn test_walk_cycle_only_while_moving_sideways() {
        let mut p = player();
        let right = Movement {
            right: true,
            ..Default::default()
        };
        p.update(right, PLAYER_FRAME_TIME);
        assert_eq!(p.entity().frame_index(), 1);
        assert_eq!(p.facing(), Facing::Right);

        p.update(UP, PLAYER_FRAME_TIME);
        assert_eq!(p.entity().frame_index(), 0);

        let left = Movement {
            left: true,
            ..Default::default()
        };
        p.update(left, 0.01);
        assert_eq!(p.facing(), Facing::Left);
    }

    #[test]
    fn test_down_is_clamped_to_pad() {
        let mut p = player();
        let down = Movement {
            down: true,
            ..Default::default()
        };
        p.update(down, 1.0);
        assert_eq!(p.position().y, p.start_position().y);
    }

    proptest! {
        #[test]
        fn prop_x_stays_on_screen(x in -500.0f32..2500.0, left in any::<bool>(), dt in 0.0f32..1.0) {
            let mut p = player();
            p.entity.position.x = x;
            let movement = Movement { left, right: !left, ..Default::default() };
            p.update(movement, dt);
            let max_x = SCREEN_WIDTH - p.entity().width();
            prop_assert!(p.position().x >= 0.0);
            prop_assert!(p.position().x <= max_x);
        }
    }
}
