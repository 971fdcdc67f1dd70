//! Session state and entity types

use std::time::Duration;

use crate::assets::SpriteHandle;

use super::rules::Rules;
use super::tick::lane_to_x;

/// Logical player actions; every input surface reduces to one of these
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Session lifecycle. The collision pause is a sub-state of `Playing`,
/// tracked by `Session::paused_until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub jumping: bool,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Standing on the floor in the middle lane
    pub fn new(rules: &Rules) -> Self {
        let lane = rules.middle_lane();
        Self {
            lane,
            x: lane_to_x(rules, lane),
            y: rules.player_ground_y(),
            vy: 0.0,
            jumping: false,
            width: rules.player_width,
            height: rules.player_height,
        }
    }

    pub fn set_lane(&mut self, rules: &Rules, lane: usize) {
        self.lane = lane.min(rules.lane_count - 1);
        self.x = lane_to_x(rules, self.lane);
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Units moved down per unpaused frame
    pub speed: f32,
    pub sprite: Option<SpriteHandle>,
}

impl Obstacle {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Where and when the last hit happened (drawn as feedback during the pause)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionMarker {
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub at: Duration,
}

/// One run of the game, owned by the caller and reset explicitly
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: Phase,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub health: u8,
    /// Game time in seconds; only advances on unpaused frames
    pub elapsed: f64,
    pub last_spawn: Duration,
    pub paused_until: Option<Duration>,
    pub collision: Option<CollisionMarker>,
    /// Sprites the spawner picks from; empty for the classic variant
    pub obstacle_sprites: Vec<SpriteHandle>,
}

impl Session {
    pub fn new(rules: &Rules) -> Self {
        Self {
            phase: Phase::NotStarted,
            player: Player::new(rules),
            obstacles: Vec::new(),
            health: rules.max_health,
            elapsed: 0.0,
            last_spawn: Duration::ZERO,
            paused_until: None,
            collision: None,
            obstacle_sprites: Vec::new(),
        }
    }

    pub fn with_obstacle_sprites(mut self, sprites: Vec<SpriteHandle>) -> Self {
        self.obstacle_sprites = sprites;
        self
    }

    /// NotStarted -> Playing. No-op in any other phase.
    pub fn start(&mut self, now: Duration) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::Playing;
            self.last_spawn = now;
            log::info!("Run started");
        }
    }

    /// Back to a fresh Playing run, keeping the sprite set
    pub fn restart(&mut self, rules: &Rules, now: Duration) {
        let sprites = std::mem::take(&mut self.obstacle_sprites);
        *self = Session::new(rules).with_obstacle_sprites(sprites);
        self.phase = Phase::Playing;
        self.last_spawn = now;
        log::info!("Run restarted");
    }

    pub fn is_paused(&self, now: Duration) -> bool {
        self.paused_until.is_some_and(|until| now < until)
    }

    /// Time left in the collision pause
    pub fn pause_remaining(&self, now: Duration) -> Option<Duration> {
        self.paused_until
            .filter(|until| now < *until)
            .map(|until| until - now)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn score(&self, rules: &Rules) -> u32 {
        (self.elapsed * rules.score_per_second).floor() as u32
    }

    /// Current fall speed for newly spawned obstacles
    pub fn obstacle_speed(&self, rules: &Rules) -> f32 {
        rules.obstacle_speed(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_waits_for_start() {
        let rules = Rules::default();
        let session = Session::new(&rules);
        assert_eq!(session.phase, Phase::NotStarted);
        assert_eq!(session.health, 3);
        assert_eq!(session.player.lane, 1);
        assert!(!session.player.jumping);
        assert_eq!(session.player.bottom(), rules.floor_y());
    }

    #[test]
    fn start_only_from_not_started() {
        let rules = Rules::default();
        let mut session = Session::new(&rules);
        session.start(Duration::from_millis(100));
        assert!(session.is_playing());
        assert_eq!(session.last_spawn, Duration::from_millis(100));

        session.phase = Phase::GameOver;
        session.start(Duration::from_millis(500));
        assert!(session.is_game_over());
    }

    #[test]
    fn pause_window_is_half_open() {
        let rules = Rules::default();
        let mut session = Session::new(&rules);
        session.paused_until = Some(Duration::from_millis(2000));
        assert!(session.is_paused(Duration::from_millis(1999)));
        assert!(!session.is_paused(Duration::from_millis(2000)));
        assert_eq!(
            session.pause_remaining(Duration::from_millis(1500)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(session.pause_remaining(Duration::from_millis(2500)), None);
    }

    #[test]
    fn score_is_time_based() {
        let rules = Rules::default();
        let mut session = Session::new(&rules);
        session.elapsed = 2.55;
        assert_eq!(session.score(&rules), 25);
    }

    #[test]
    fn set_lane_clamps_to_last_lane() {
        let rules = Rules::default();
        let mut player = Player::new(&rules);
        player.set_lane(&rules, 9);
        assert_eq!(player.lane, 2);
        assert_eq!(player.x, lane_to_x(&rules, 2));
    }
}
