//! Per-frame simulation step
//!
//! One call advances the playing world by `dt` seconds in a fixed order:
//! interstitial countdown, player, traffic, collision, explosion, progression.

use super::collision::first_hit;
use super::player::{Movement, PlayerStep};
use super::progression::Progress;
use super::state::{GameEvent, World};

/// What the step means for the mode machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Final level cleared
    Won,
}

/// Advance the playing world by one frame
pub fn tick(world: &mut World, movement: Movement, dt: f32) -> TickOutcome {
    world.time_ticks += 1;

    // Nothing but the countdown runs during the interstitial
    if world.progression.is_loading() {
        if let Some(level) = world.progression.tick_interstitial(dt) {
            world.begin_level(level);
        }
        return TickOutcome::Continue;
    }

    let mut hit_this_frame = false;

    if world.collisions_armed() {
        if world.player.update(movement, dt) == PlayerStep::Scored {
            let score = world.player.score();
            world.emit(GameEvent::Scored { score });
        }

        world.obstacles.update(dt);

        if let Some(hit) = first_hit(&world.player.bounds(), &world.obstacles) {
            let position = world.player.position();
            log::debug!("Player hit by {:?} #{}", hit.kind, hit.index);
            world.player_visible = false;
            world.colliding = true;
            world.explosion.trigger(position);
            world.emit(GameEvent::Exploded { position });
            hit_this_frame = true;
        }
    } else if !world.explosion.is_active() && world.colliding {
        world.player.reset_position();
        world.player_visible = true;
        world.colliding = false;
    }

    if !hit_this_frame {
        world.explosion.update(dt);
    }

    match world.progression.check_progress(world.player.score()) {
        Progress::Stay => TickOutcome::Continue,
        Progress::Advanced(level) => {
            world.emit(GameEvent::LevelLoading(level));
            TickOutcome::Continue
        }
        Progress::Won => {
            world.emit(GameEvent::Won);
            TickOutcome::Won
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::{ObstacleKind, RoadType};
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        let mut world = World::new(SCREEN_WIDTH, SCREEN_HEIGHT, ROAD_WIDTH, 1);
        world.reset(RoadType::Retro);
        world
    }

    /// Park every obstacle far away from the player
    fn clear_road(world: &mut World) {
        let parked = vec![Vec2::new(-5000.0, -5000.0); world.obstacles.len()];
        world.obstacles.restore_positions(&parked).unwrap();
        world.obstacles.restore_speeds(&vec![0.0; parked.len()]).unwrap();
    }

    fn put_player_under_first_car(world: &mut World) {
        let mut positions = world.obstacles.positions();
        positions[0] = world.player.position();
        world.obstacles.restore_positions(&positions).unwrap();
        world.obstacles.restore_speeds(&vec![0.0; positions.len()]).unwrap();
    }

    #[test]
    fn test_reset_configures_level_one() {
        let world = world();
        assert_eq!(world.level(), 1);
        assert_eq!(world.obstacles.len(), 4);
        assert!(world.player_visible);
    }

    #[test]
    fn test_collision_triggers_explosion_once() {
        let mut world = world();
        put_player_under_first_car(&mut world);

        tick(&mut world, Movement::default(), DT);
        assert!(!world.player_visible);
        assert!(world.colliding);
        assert!(world.explosion.is_active());
        let events = world.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Exploded { .. }))
                .count(),
            1
        );

        // Still overlapping, but no re-trigger while the blast plays
        tick(&mut world, Movement::default(), DT);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_respawn_after_explosion() {
        let mut world = world();
        put_player_under_first_car(&mut world);
        tick(&mut world, Movement::default(), DT);
        clear_road(&mut world);

        let frames = (EXPLOSION_DURATION / DT) as usize + 3;
        for _ in 0..frames {
            tick(&mut world, Movement::default(), DT);
        }
        assert!(!world.explosion.is_active());
        assert!(world.player_visible);
        assert!(!world.colliding);
        assert_eq!(world.player.position(), world.player.start_position());
    }

    #[test]
    fn test_traffic_frozen_during_explosion() {
        let mut world = world();
        put_player_under_first_car(&mut world);
        world.obstacles.restore_speeds(&[100.0; 4]).unwrap();
        tick(&mut world, Movement::default(), DT);
        let frozen = world.obstacles.positions();
        tick(&mut world, Movement::default(), DT);
        assert_eq!(world.obstacles.positions(), frozen);
    }

    #[test]
    fn test_crossing_advances_through_interstitial() {
        let mut world = world();
        clear_road(&mut world);
        world.player.set_score(1);

        tick(&mut world, Movement::default(), DT);
        assert_eq!(world.level(), 2);
        assert!(world.progression.is_loading());
        assert!(world.drain_events().contains(&GameEvent::LevelLoading(2)));

        // Player input is ignored while loading
        let before = world.player.position();
        let up = Movement {
            up: true,
            ..Default::default()
        };
        tick(&mut world, up, 1.0);
        assert_eq!(world.player.position(), before);
        assert_eq!(world.obstacles.count_kind(ObstacleKind::Express), 0);

        tick(&mut world, up, 1.0);
        assert!(!world.progression.is_loading());
        assert_eq!(world.obstacles.count_kind(ObstacleKind::Express), 1);
        assert_eq!(world.player.speed(), 220.0);
        assert_eq!(world.road, RoadType::Level2);
        assert!(world.drain_events().contains(&GameEvent::LevelStarted(2)));
    }

    #[test]
    fn test_clearing_level_three_wins() {
        let mut world = world();
        world.restore(2, 3, RoadType::Level3).unwrap();
        clear_road(&mut world);
        world.player.set_score(3);
        assert_eq!(tick(&mut world, Movement::default(), DT), TickOutcome::Won);
        assert!(world.drain_events().contains(&GameEvent::Won));
    }

    #[test]
    fn test_restore_rebuilds_traffic() {
        let mut world = world();
        world.restore(5, 3, RoadType::Level3).unwrap();
        assert_eq!(world.level(), 3);
        assert_eq!(world.score(), 5);
        assert_eq!(world.obstacles.count_kind(ObstacleKind::Creature), 2);
        assert_eq!(world.obstacles.count_kind(ObstacleKind::Express), 0);
        assert_eq!(world.player.speed(), 270.0);
        assert_eq!(world.road, RoadType::Level3);
    }
}
