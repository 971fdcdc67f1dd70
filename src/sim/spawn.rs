//! Obstacle spawning
//!
//! A batch drops 1..=3 obstacles at once. Lanes are sampled without
//! replacement, so a batch never stacks two obstacles in one lane.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use super::rules::Rules;
use super::state::{Obstacle, Session};
use super::tick::center_in_lane;

/// Pick `count` distinct lanes out of `lane_count`
pub fn pick_lanes<R: Rng + ?Sized>(rng: &mut R, lane_count: usize, count: usize) -> Vec<usize> {
    index::sample(rng, lane_count, count.min(lane_count)).into_vec()
}

/// Spawn one batch just above the top edge. Returns the lanes used.
pub fn spawn_batch<R: Rng + ?Sized>(session: &mut Session, rules: &Rules, rng: &mut R) -> Vec<usize> {
    let count = rng.gen_range(1..=rules.batch_limit());
    let lanes = pick_lanes(rng, rules.lane_count, count);
    let speed = session.obstacle_speed(rules);

    for &lane in &lanes {
        let sprite = session.obstacle_sprites.choose(rng).copied();
        session.obstacles.push(Obstacle {
            lane,
            x: center_in_lane(rules, lane, rules.obstacle_width),
            y: -rules.obstacle_height,
            width: rules.obstacle_width,
            height: rules.obstacle_height,
            speed,
            sprite,
        });
    }

    log::debug!("Spawned {} obstacle(s) in lanes {:?} at speed {:.2}", lanes.len(), lanes, speed);
    lanes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteHandle;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn batch_starts_above_the_field() {
        let rules = Rules::default();
        let mut session = Session::new(&rules);
        let mut rng = StdRng::seed_from_u64(7);
        let lanes = spawn_batch(&mut session, &rules, &mut rng);

        assert!((1..=3).contains(&lanes.len()));
        assert_eq!(session.obstacles.len(), lanes.len());
        for obs in &session.obstacles {
            assert_eq!(obs.y, -rules.obstacle_height);
            assert_eq!(obs.speed, rules.base_obstacle_speed);
            assert!(obs.sprite.is_none());
            assert!(obs.x >= obs.lane as f32 * rules.lane_width());
        }
    }

    #[test]
    fn speed_includes_difficulty_ramp() {
        let rules = Rules::default();
        let mut session = Session::new(&rules);
        session.elapsed = 30.0;
        let mut rng = StdRng::seed_from_u64(1);
        spawn_batch(&mut session, &rules, &mut rng);
        assert!(session.obstacles.iter().all(|o| (o.speed - 4.5).abs() < 1e-6));
    }

    #[test]
    fn sprites_come_from_the_session_set() {
        let rules = Rules::default();
        let sprites = vec![SpriteHandle::new(4), SpriteHandle::new(5)];
        let mut session = Session::new(&rules).with_obstacle_sprites(sprites.clone());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            spawn_batch(&mut session, &rules, &mut rng);
        }
        assert!(session
            .obstacles
            .iter()
            .all(|o| o.sprite.is_some_and(|s| sprites.contains(&s))));
    }

    #[test]
    fn single_lane_field_spawns_one() {
        let rules = Rules {
            lane_count: 1,
            game_width: 120.0,
            ..Rules::default()
        };
        let mut session = Session::new(&rules);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            assert_eq!(spawn_batch(&mut session, &rules, &mut rng), vec![0]);
        }
    }

    proptest! {
        #[test]
        fn batch_lanes_are_distinct(seed in any::<u64>(), lane_count in 1usize..8) {
            let rules = Rules {
                lane_count,
                game_width: 120.0 * lane_count as f32,
                ..Rules::default()
            };
            let mut session = Session::new(&rules);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut lanes = spawn_batch(&mut session, &rules, &mut rng);

            prop_assert!(!lanes.is_empty() && lanes.len() <= 3usize.min(lane_count));
            prop_assert!(lanes.iter().all(|&l| l < lane_count));
            lanes.sort_unstable();
            lanes.dedup();
            prop_assert_eq!(lanes.len(), session.obstacles.len());
        }
    }
}
