//! Per-frame update
//!
//! `update` runs once per scheduled frame: gravity, spawning, obstacle
//! motion, collisions, then the game clock. A hit that leaves health
//! freezes everything except rendering until the pause deadline passes.

use std::time::Duration;

use rand::Rng;

use super::rules::Rules;
use super::spawn::spawn_batch;
use super::state::{Action, CollisionMarker, Obstacle, Phase, Player, Session};

/// What the caller should do with the frame scheduler after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Request another frame
    Continue,
    /// Nothing left to animate (not started or game over)
    Stop,
}

/// Left edge of a `width`-wide box centered in `lane`
#[inline]
pub fn center_in_lane(rules: &Rules, lane: usize, width: f32) -> f32 {
    let lane_width = rules.lane_width();
    lane as f32 * lane_width + (lane_width - width) / 2.0
}

/// Player x for a lane
#[inline]
pub fn lane_to_x(rules: &Rules, lane: usize) -> f32 {
    center_in_lane(rules, lane, rules.player_width)
}

/// Same lane and overlapping vertically. Never true mid-jump.
pub fn check_collision(player: &Player, obstacle: &Obstacle) -> bool {
    if player.jumping {
        return false;
    }
    player.lane == obstacle.lane && obstacle.bottom() > player.y && obstacle.y < player.bottom()
}

fn apply_gravity(player: &mut Player, rules: &Rules) {
    player.vy += rules.gravity;
    player.y += player.vy;

    // Land
    if player.bottom() > rules.floor_y() {
        player.y = rules.floor_y() - player.height;
        player.vy = 0.0;
        player.jumping = false;
    }
}

fn register_hit(session: &mut Session, rules: &Rules, obstacle: &Obstacle, now: Duration) {
    session.collision = Some(CollisionMarker {
        lane: obstacle.lane,
        x: obstacle.x,
        y: obstacle.y,
        at: now,
    });

    if session.health > 1 {
        session.health -= 1;
        let pause = rules.collision_pause();
        if !pause.is_zero() {
            session.paused_until = Some(now + pause);
        }
        log::info!(
            "Hit in lane {} at {:.1}s - {} health left",
            obstacle.lane,
            session.elapsed,
            session.health
        );
    } else {
        session.health = 0;
        session.phase = Phase::GameOver;
        log::info!(
            "Game over at {:.1}s - score {}",
            session.elapsed,
            session.score(rules)
        );
    }
}

/// Advance the session by one frame at timestamp `now`
pub fn update<R: Rng + ?Sized>(session: &mut Session, rules: &Rules, rng: &mut R, now: Duration) -> Frame {
    if !session.is_playing() {
        return Frame::Stop;
    }

    // Collision pause: render only
    if session.is_paused(now) {
        return Frame::Continue;
    }
    if session.paused_until.take().is_some() {
        log::debug!("Collision pause over");
    }
    session.collision = None;

    apply_gravity(&mut session.player, rules);

    if now.saturating_sub(session.last_spawn) > rules.spawn_interval() {
        spawn_batch(session, rules, rng);
        session.last_spawn = now;
    }

    // Reverse so removal doesn't skip anything; one hit per frame
    let mut hit = false;
    for i in (0..session.obstacles.len()).rev() {
        let obs = &mut session.obstacles[i];
        obs.y += obs.speed;

        if obs.y > rules.game_height {
            session.obstacles.remove(i);
            continue;
        }

        if !hit && check_collision(&session.player, &session.obstacles[i]) {
            let obstacle = session.obstacles.remove(i);
            register_hit(session, rules, &obstacle, now);
            hit = true;
        }
    }

    if session.is_game_over() {
        return Frame::Stop;
    }

    if !session.is_paused(now) {
        session.elapsed += rules.frame_dt;
    }
    Frame::Continue
}

/// Apply a player action. Returns false when it was ignored.
pub fn apply_action(session: &mut Session, rules: &Rules, action: Action, now: Duration) -> bool {
    if !session.is_playing() || session.is_paused(now) {
        return false;
    }

    let player = &mut session.player;
    match action {
        Action::MoveLeft => {
            if player.lane == 0 {
                return false;
            }
            let lane = player.lane - 1;
            player.set_lane(rules, lane);
        }
        Action::MoveRight => {
            if player.lane + 1 >= rules.lane_count {
                return false;
            }
            let lane = player.lane + 1;
            player.set_lane(rules, lane);
        }
        Action::Jump => {
            if player.jumping {
                return false;
            }
            player.vy = rules.jump_force;
            player.jumping = true;
        }
    }
    true
}
