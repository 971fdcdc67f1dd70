use std::time::Duration;

use ratatui::prelude::*;

use crate::sim::{Rules, Session};
use crate::skins::{CellRect, Grid, Skin};

/// Multiple of every background pattern period, so wrapping never jumps
const SCROLL_PERIOD: usize = 12_000;

struct Scale {
    sx: f32,
    sy: f32,
}

impl Scale {
    fn new(rules: &Rules, width: usize, height: usize) -> Self {
        Self {
            sx: width as f32 / rules.game_width,
            sy: height as f32 / rules.game_height,
        }
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> CellRect {
        CellRect {
            x: (x * self.sx).floor() as i32,
            y: (y * self.sy).floor() as i32,
            w: ((w * self.sx).round() as i32).max(1),
            h: ((h * self.sy).round() as i32).max(1),
        }
    }
}

/// Paint the playfield scaled into `width` x `height` cells
pub fn paint_field(
    session: &Session,
    rules: &Rules,
    skin: &dyn Skin,
    now: Duration,
    width: usize,
    height: usize,
) -> Grid {
    let mut grid = Grid::new(width, height);
    if width == 0 || height == 0 {
        return grid;
    }
    let scale = Scale::new(rules, width, height);

    // Background scrolls down at the base obstacle speed
    let travelled = (session.elapsed * 60.0 * (rules.base_obstacle_speed * scale.sy) as f64) as usize;
    let scroll = SCROLL_PERIOD - travelled % SCROLL_PERIOD;
    let lane_edges: Vec<i32> = (1..rules.lane_count)
        .map(|lane| (lane as f32 * rules.lane_width() * scale.sx).floor() as i32)
        .collect();
    skin.background(&mut grid, &lane_edges, scroll);

    let floor_row = (rules.floor_y() * scale.sy).floor() as i32;
    let ground = Style::default().fg(Color::Rgb(140, 120, 100));
    for x in 0..width as i32 {
        grid.put(x, floor_row, '━', ground);
    }

    for obs in &session.obstacles {
        let rect = scale.rect(obs.x, obs.y, obs.width, obs.height);
        skin.obstacle(&mut grid, rect, obs.sprite);
    }

    let hurt = session.is_paused(now);
    if let Some(marker) = session.collision {
        let rect = scale.rect(marker.x, marker.y, rules.obstacle_width, rules.obstacle_height);
        let flash = Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD);
        let cx = rect.x + rect.w / 2;
        let cy = rect.y + rect.h / 2;
        for (dx, dy, ch) in [(0, 0, '✸'), (-2, 0, '·'), (2, 0, '·'), (0, -1, '*'), (0, 1, '*')] {
            grid.put(cx + dx, cy + dy, ch, flash);
        }
    }

    let player = &session.player;
    let rect = scale.rect(player.x, player.y, player.width, player.height);
    // Blink while the hit pause runs
    let blink = hurt && (now.as_millis() / 150) % 2 == 0;
    skin.player(&mut grid, rect, player.jumping, blink);

    grid
}

pub fn render_field(
    session: &Session,
    rules: &Rules,
    skin: &dyn Skin,
    now: Duration,
    width: usize,
    height: usize,
) -> Vec<Line<'static>> {
    paint_field(session, rules, skin, now, width, height).into_lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CollisionMarker, Obstacle};
    use crate::skins::ClassicSkin;

    #[test]
    fn player_lands_in_its_lane() {
        let rules = Rules::default();
        let mut session = Session::new(&rules);
        session.player.set_lane(&rules, 0);

        let grid = paint_field(&session, &rules, &ClassicSkin, Duration::ZERO, 36, 60);
        let row = grid.row_text(55);
        assert_eq!(row.chars().skip(3).take(5).collect::<String>(), "█████");
        assert_ne!(row.chars().nth(12), Some('█'));
        assert!(grid.row_text(58).chars().all(|c| c == '━'));
    }

    #[test]
    fn obstacles_and_hit_marker_are_drawn() {
        let rules = Rules::default();
        let mut session = Session::new(&rules);
        session.obstacles.push(Obstacle {
            lane: 2,
            x: 275.0,
            y: 100.0,
            width: 50.0,
            height: 50.0,
            speed: 4.0,
            sprite: None,
        });
        session.collision = Some(CollisionMarker {
            lane: 0,
            x: 35.0,
            y: 300.0,
            at: Duration::ZERO,
        });

        let grid = paint_field(&session, &rules, &ClassicSkin, Duration::ZERO, 36, 60);
        assert_eq!(grid.row_text(12).chars().skip(27).take(5).collect::<String>(), "▓▓▓▓▓");
        assert!(grid.row_text(32).contains('✸'));
    }

    #[test]
    fn empty_area_is_fine() {
        let rules = Rules::default();
        let session = Session::new(&rules);
        assert!(render_field(&session, &rules, &ClassicSkin, Duration::ZERO, 0, 0).is_empty());
    }
}
