//! Moving bodies shared by the player and the road traffic
//!
//! Every entity is an axis-aligned sprite: a top-left position, a frame size
//! in sprite pixels and a per-axis scale. The collision box is derived from
//! those three and never stored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left origin, screen coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Overlap test; touching edges do not count as a hit
    pub fn intersects(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        other.min.x < a_max.x && self.min.x < b_max.x && other.min.y < a_max.y && self.min.y < b_max.y
    }
}

/// Sprite sheet layout for an entity: frames laid out horizontally
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    pub frame_width: f32,
    pub frame_height: f32,
    /// Number of frames in the strip (1 = static image)
    pub frame_count: u32,
    /// Seconds per frame (0 = not animated)
    pub frame_duration: f32,
}

impl SpriteSheet {
    pub const fn still(frame_width: f32, frame_height: f32) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_count: 1,
            frame_duration: 0.0,
        }
    }

    pub const fn strip(frame_width: f32, frame_height: f32, frame_count: u32, frame_duration: f32) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_count,
            frame_duration,
        }
    }

    /// A sheet with no usable frame stands in for an asset that failed to load
    pub fn is_valid(&self) -> bool {
        self.frame_width > 0.0 && self.frame_height > 0.0 && self.frame_count > 0
    }

    pub fn is_animated(&self) -> bool {
        self.frame_count > 1 && self.frame_duration > 0.0
    }
}

/// Frame-based animation cursor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub frame_count: u32,
    pub frame_index: u32,
    pub frame_duration: f32,
    pub elapsed: f32,
}

impl Animation {
    pub fn new(frame_count: u32, frame_duration: f32) -> Self {
        Self {
            frame_count: frame_count.max(1),
            frame_index: 0,
            frame_duration,
            elapsed: 0.0,
        }
    }

    /// Accumulate time and step to the next frame once a frame's worth has passed
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.frame_duration {
            self.elapsed = 0.0;
            self.frame_index = (self.frame_index + 1) % self.frame_count;
        }
    }

    /// Back to the first frame (idle pose)
    pub fn rewind(&mut self) {
        self.frame_index = 0;
    }
}

/// Which sprite sheet the player uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// A moving sprite: the player or one piece of traffic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Vec2,
    /// Unit vector; the sign of `x` picks the wrap edge
    pub direction: Vec2,
    /// Always >= 0
    pub speed: f32,
    pub scale: Vec2,
    /// Unscaled frame size in sprite pixels
    pub frame_size: Vec2,
    /// `None` means a single static frame
    pub animation: Option<Animation>,
}

impl Entity {
    /// Build an entity from its sprite sheet. Returns `None` for an unusable sheet.
    pub fn from_sheet(
        sheet: &SpriteSheet,
        position: Vec2,
        direction: Vec2,
        speed: f32,
        scale: Vec2,
    ) -> Option<Self> {
        if !sheet.is_valid() {
            return None;
        }
        let animation = sheet
            .is_animated()
            .then(|| Animation::new(sheet.frame_count, sheet.frame_duration));
        Some(Self {
            position,
            direction: direction.normalize_or_zero(),
            speed: speed.max(0.0),
            scale,
            frame_size: Vec2::new(sheet.frame_width, sheet.frame_height),
            animation,
        })
    }

    /// On-screen size (frame size times scale)
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.frame_size * self.scale
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size().x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size().y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.position,
            size: self.size(),
        }
    }

    /// Current animation frame (0 for static sprites)
    pub fn frame_index(&self) -> u32 {
        self.animation.map(|a| a.frame_index).unwrap_or(0)
    }

    /// Move along `direction` at `speed`
    pub fn advance(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
    }

    /// Speeds only ever go up; negative deltas are ignored
    pub fn boost(&mut self, delta: f32) {
        self.speed += delta.max(0.0);
    }

    /// Flip horizontal travel
    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }
}
