//! Tunable game constants
//!
//! Both variants share this rule set. Any field can be overridden from a
//! JSON rules file; missing fields keep their defaults.

use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Playfield size in abstract units
    pub game_width: f32,
    pub game_height: f32,
    pub lane_count: usize,
    /// Distance between the floor line and the bottom edge
    pub ground_margin: f32,

    pub player_width: f32,
    pub player_height: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,

    /// Added to the player's vertical velocity every frame
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_force: f32,
    pub base_obstacle_speed: f32,
    /// Elapsed seconds are divided by this and added to the fall speed
    pub speed_ramp_divisor: f32,

    pub spawn_interval_ms: u64,
    pub max_spawn_batch: usize,
    /// Freeze after a non-fatal hit; 0 disables the pause
    pub collision_pause_ms: u64,

    pub max_health: u8,
    /// Game time added per unpaused frame, in seconds
    pub frame_dt: f64,
    pub score_per_second: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            game_width: 360.0,
            game_height: 600.0,
            lane_count: 3,
            ground_margin: 20.0,

            player_width: 50.0,
            player_height: 50.0,
            obstacle_width: 50.0,
            obstacle_height: 50.0,

            gravity: 0.6,
            jump_force: -12.0,
            base_obstacle_speed: 4.0,
            speed_ramp_divisor: 60.0,

            spawn_interval_ms: 800,
            max_spawn_batch: 3,
            collision_pause_ms: 2000,

            max_health: 3,
            frame_dt: 1.0 / 60.0,
            score_per_second: 10.0,
        }
    }
}

impl Rules {
    pub fn lane_width(&self) -> f32 {
        self.game_width / self.lane_count as f32
    }

    /// Y coordinate of the floor line the player stands on
    pub fn floor_y(&self) -> f32 {
        self.game_height - self.ground_margin
    }

    /// Player y when standing on the floor
    pub fn player_ground_y(&self) -> f32 {
        self.floor_y() - self.player_height
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn collision_pause(&self) -> Duration {
        Duration::from_millis(self.collision_pause_ms)
    }

    /// Fall speed of obstacles spawned after `elapsed` seconds of play
    pub fn obstacle_speed(&self, elapsed: f64) -> f32 {
        self.base_obstacle_speed + (elapsed as f32) / self.speed_ramp_divisor
    }

    /// Largest spawn batch that still fits into distinct lanes
    pub fn batch_limit(&self) -> usize {
        self.max_spawn_batch.min(self.lane_count)
    }

    pub fn middle_lane(&self) -> usize {
        self.lane_count / 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.lane_count == 0 {
            bail!("lane_count must be at least 1");
        }
        if self.max_spawn_batch == 0 {
            bail!("max_spawn_batch must be at least 1");
        }
        if self.max_health == 0 {
            bail!("max_health must be at least 1");
        }
        if !(self.game_width > 0.0 && self.game_height > 0.0) {
            bail!("playfield must have a positive size");
        }
        if !(self.player_width > 0.0 && self.player_height > 0.0) {
            bail!("player must have a positive size");
        }
        if !(self.obstacle_width > 0.0 && self.obstacle_height > 0.0) {
            bail!("obstacles must have a positive size");
        }
        if self.player_width > self.lane_width() || self.obstacle_width > self.lane_width() {
            bail!(
                "sprites wider than a lane ({:.1} units) cannot be centered",
                self.lane_width()
            );
        }
        if self.ground_margin < 0.0 || self.player_ground_y() < 0.0 {
            bail!("floor line leaves no room for the player");
        }
        if self.gravity <= 0.0 {
            bail!("gravity must be positive");
        }
        if self.jump_force >= 0.0 {
            bail!("jump_force must be negative (upwards)");
        }
        if self.base_obstacle_speed <= 0.0 {
            bail!("base_obstacle_speed must be positive");
        }
        if self.speed_ramp_divisor <= 0.0 {
            bail!("speed_ramp_divisor must be positive");
        }
        if self.frame_dt <= 0.0 {
            bail!("frame_dt must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let rules = Rules::default();
        rules.validate().unwrap();
        assert_eq!(rules.lane_width(), 120.0);
        assert_eq!(rules.player_ground_y(), 530.0);
        assert_eq!(rules.batch_limit(), 3);
        assert_eq!(rules.middle_lane(), 1);
    }

    #[test]
    fn speed_ramps_with_elapsed_time() {
        let rules = Rules::default();
        assert_eq!(rules.obstacle_speed(0.0), 4.0);
        assert!((rules.obstacle_speed(60.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn batch_limit_never_exceeds_lanes() {
        let rules = Rules {
            lane_count: 2,
            ..Rules::default()
        };
        assert_eq!(rules.batch_limit(), 2);
    }

    #[test]
    fn rejects_impossible_values() {
        let cases = [
            Rules { lane_count: 0, ..Rules::default() },
            Rules { gravity: 0.0, ..Rules::default() },
            Rules { jump_force: 3.0, ..Rules::default() },
            Rules { max_health: 0, ..Rules::default() },
            Rules { player_width: 200.0, ..Rules::default() },
            Rules { max_spawn_batch: 0, ..Rules::default() },
            Rules { ground_margin: 700.0, ..Rules::default() },
        ];
        for rules in cases {
            assert!(rules.validate().is_err(), "accepted {rules:?}");
        }
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rules: Rules =
            serde_json::from_str(r#"{ "collision_pause_ms": 0, "lane_count": 4 }"#).unwrap();
        assert_eq!(rules.collision_pause_ms, 0);
        assert_eq!(rules.lane_count, 4);
        assert_eq!(rules.gravity, Rules::default().gravity);
        assert_eq!(rules.lane_width(), 90.0);
    }
}
