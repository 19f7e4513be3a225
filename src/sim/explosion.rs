//! Timed explosion played when the player is hit

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_DURATION, EXPLOSION_MAX_SCALE, EXPLOSION_SEED_SCALE};

/// Explosion animation state. Starts inert; `trigger` arms it and it switches
/// itself off once `duration` seconds have accumulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionSequencer {
    position: Vec2,
    scale: f32,
    max_scale: f32,
    elapsed: f32,
    duration: f32,
    active: bool,
}

impl Default for ExplosionSequencer {
    fn default() -> Self {
        Self::new(EXPLOSION_MAX_SCALE, EXPLOSION_DURATION)
    }
}

impl ExplosionSequencer {
    pub fn new(max_scale: f32, duration: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            scale: EXPLOSION_SEED_SCALE,
            max_scale,
            elapsed: 0.0,
            duration,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Start a new explosion at `position`
    pub fn trigger(&mut self, position: Vec2) {
        self.position = position;
        self.scale = EXPLOSION_SEED_SCALE;
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Grow the blast; no-op while inactive
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.elapsed += dt;
        let growth = (self.max_scale - EXPLOSION_SEED_SCALE) / self.duration;
        self.scale = (self.scale + dt * growth).min(self.max_scale);
        if self.elapsed >= self.duration {
            self.active = false;
        }
    }

    /// Drop any running explosion (new game, loaded save)
    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
        self.scale = EXPLOSION_SEED_SCALE;
    }
}
