//! Player-versus-traffic collision detection
//!
//! Plain axis-aligned box overlap. Only the existence of a hit matters, so the
//! scan stops at the first obstacle (in insertion order) that overlaps.

use super::entity::Aabb;
use super::level::ObstacleKind;
use super::obstacles::ObstacleSet;

/// The obstacle that ran the player over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index into the obstacle set's insertion order
    pub index: usize,
    pub kind: ObstacleKind,
}

/// Box overlap test
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

/// First obstacle whose box overlaps `player`, if any
pub fn first_hit(player: &Aabb, obstacles: &ObstacleSet) -> Option<Hit> {
    obstacles
        .iter()
        .enumerate()
        .find(|(_, o)| intersects(player, &o.entity.bounds()))
        .map(|(index, o)| Hit {
            index,
            kind: o.kind,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::SpriteSheet;
    use crate::sim::level::ObstacleSpec;
    use glam::Vec2;

    fn block(x: f32, y: f32, kind: ObstacleKind) -> ObstacleSpec {
        ObstacleSpec {
            kind,
            sheet: SpriteSheet::still(10.0, 10.0),
            position: Vec2::new(x, y),
            scale: Vec2::ONE,
            speed: 0.0,
            direction: Vec2::NEG_X,
        }
    }

    #[test]
    fn test_box_overlap() {
        let player = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(intersects(&player, &Aabb::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!intersects(&player, &Aabb::new(20.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_first_hit_in_insertion_order() {
        let mut set = ObstacleSet::new(1180.0);
        set.spawn(&block(100.0, 100.0, ObstacleKind::Traffic)).unwrap();
        set.spawn(&block(5.0, 5.0, ObstacleKind::Express)).unwrap();
        set.spawn(&block(2.0, 2.0, ObstacleKind::Creature)).unwrap();

        let player = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(
            first_hit(&player, &set),
            Some(Hit {
                index: 1,
                kind: ObstacleKind::Express
            })
        );
    }

    #[test]
    fn test_no_hit_on_empty_road() {
        let set = ObstacleSet::new(1180.0);
        assert!(first_hit(&Aabb::new(0.0, 0.0, 10.0, 10.0), &set).is_none());
    }
}
