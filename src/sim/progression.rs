//! Level progression: score thresholds, the between-level interstitial and
//! difficulty scaling

use serde::{Deserialize, Serialize};

use super::level::{MAX_LEVEL, level_config};
use super::obstacles::{ObstacleError, ObstacleSet};
use super::player::PlayerController;
use crate::consts::INTERSTITIAL_SECONDS;

/// Outcome of a progress check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Threshold not reached
    Stay,
    /// Advanced; the interstitial for this level is now counting down
    Advanced(u32),
    /// Cleared the last level
    Won,
}

/// Fixed "Loading Level N" countdown between levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interstitial {
    pub level: u32,
    pub remaining: f32,
}

/// Whether `score` earns a promotion out of `level`.
///
/// The required score grows linearly: `points_to_next_level * level`.
pub fn should_advance(score: u32, level: u32, points_to_next_level: u32) -> bool {
    score >= points_to_next_level.saturating_mul(level)
}

/// Owns the level-state record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelProgressionController {
    level: u32,
    points_to_next_level: u32,
    interstitial: Option<Interstitial>,
    won: bool,
}

impl LevelProgressionController {
    pub fn new(points_to_next_level: u32) -> Self {
        Self {
            level: 1,
            points_to_next_level: points_to_next_level.max(1),
            interstitial: None,
            won: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn points_to_next_level(&self) -> u32 {
        self.points_to_next_level
    }

    pub fn interstitial(&self) -> Option<Interstitial> {
        self.interstitial
    }

    pub fn is_loading(&self) -> bool {
        self.interstitial.is_some()
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Back to level one with no countdown running
    pub fn reset(&mut self) {
        self.level = 1;
        self.interstitial = None;
        self.won = false;
    }

    /// Jump straight to `level` (restoring a save). Levels outside the table are clamped.
    pub fn set_level(&mut self, level: u32) {
        self.level = level.clamp(1, MAX_LEVEL);
        self.interstitial = None;
        self.won = false;
    }

    /// Promote when the score threshold for the current level is met
    pub fn check_progress(&mut self, score: u32) -> Progress {
        if self.won || self.interstitial.is_some() {
            return Progress::Stay;
        }
        if !should_advance(score, self.level, self.points_to_next_level) {
            return Progress::Stay;
        }

        let next = self.level + 1;
        if next > MAX_LEVEL {
            self.won = true;
            log::info!("Final level cleared with score {}", score);
            return Progress::Won;
        }

        self.level = next;
        self.interstitial = Some(Interstitial {
            level: next,
            remaining: INTERSTITIAL_SECONDS,
        });
        log::info!("Loading level {}...", next);
        Progress::Advanced(next)
    }

    /// Count the interstitial down. Returns the level to start once it expires.
    pub fn tick_interstitial(&mut self, dt: f32) -> Option<u32> {
        let interstitial = self.interstitial.as_mut()?;
        interstitial.remaining -= dt;
        if interstitial.remaining > 0.0 {
            return None;
        }
        let level = interstitial.level;
        self.interstitial = None;
        Some(level)
    }

    /// Reconfigure traffic for `level` and apply its difficulty step
    pub fn start_level(
        &self,
        level: u32,
        obstacles: &mut ObstacleSet,
        player: &mut PlayerController,
    ) -> Result<(), ObstacleError> {
        let config = level_config(level).ok_or(ObstacleError::UnknownLevel(level))?;
        if obstacles.configure_for_level(level)? {
            Self::increase_difficulty(config.player_speed, config.speed_delta, obstacles, player);
        }
        Ok(())
    }

    fn increase_difficulty(
        player_speed: f32,
        speed_delta: f32,
        obstacles: &mut ObstacleSet,
        player: &mut PlayerController,
    ) {
        player.set_speed(player_speed);
        obstacles.increase_speed(speed_delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

    #[test]
    fn test_threshold() {
        assert!(should_advance(1, 1, 1));
        assert!(!should_advance(0, 1, 1));
        assert!(!should_advance(3, 2, 2));
        assert!(should_advance(4, 2, 2));
    }

    #[test]
    fn test_check_progress_advances_to_two() {
        let mut progression = LevelProgressionController::new(1);
        assert_eq!(progression.check_progress(0), Progress::Stay);
        assert_eq!(progression.check_progress(1), Progress::Advanced(2));
        assert_eq!(progression.level(), 2);
        assert!(progression.is_loading());
    }

    #[test]
    fn test_no_double_advance_during_interstitial() {
        let mut progression = LevelProgressionController::new(1);
        progression.check_progress(1);
        assert_eq!(progression.check_progress(100), Progress::Stay);
        assert_eq!(progression.level(), 2);
    }

    #[test]
    fn test_interstitial_counts_down() {
        let mut progression = LevelProgressionController::new(1);
        progression.check_progress(1);
        assert_eq!(progression.tick_interstitial(1.0), None);
        assert_eq!(progression.tick_interstitial(0.5), None);
        assert_eq!(progression.tick_interstitial(0.5), Some(2));
        assert!(!progression.is_loading());
        assert_eq!(progression.tick_interstitial(1.0), None);
    }

    #[test]
    fn test_clearing_last_level_wins() {
        let mut progression = LevelProgressionController::new(1);
        progression.set_level(MAX_LEVEL);
        assert_eq!(progression.check_progress(MAX_LEVEL), Progress::Won);
        assert!(progression.has_won());
        assert_eq!(progression.level(), MAX_LEVEL);
        assert_eq!(progression.check_progress(100), Progress::Stay);
    }

    #[test]
    fn test_start_level_scales_difficulty_once() {
        let progression = LevelProgressionController::new(1);
        let mut obstacles = ObstacleSet::new(1180.0);
        let mut player = PlayerController::new(SCREEN_WIDTH, SCREEN_HEIGHT);

        progression.start_level(1, &mut obstacles, &mut player).unwrap();
        let blue_speed = obstacles.speeds()[0];

        progression.start_level(2, &mut obstacles, &mut player).unwrap();
        assert_eq!(player.speed(), 220.0);
        assert_eq!(obstacles.speeds()[0], blue_speed + 50.0);

        // Second call is a silent no-op
        progression.start_level(2, &mut obstacles, &mut player).unwrap();
        assert_eq!(obstacles.speeds()[0], blue_speed + 50.0);
    }
}
