use ratatui::prelude::*;

use crate::assets::SpriteHandle;

use super::{CellRect, Grid, Skin};

const BG: Color = Color::Rgb(18, 18, 28);
const LANE_LINE: Color = Color::Rgb(60, 60, 80);

/// Colored rectangles on a dark field
pub struct ClassicSkin;

impl Skin for ClassicSkin {
    fn title(&self) -> String {
        " ▦ Lane Dash ".to_string()
    }

    fn accent(&self) -> Color {
        Color::Rgb(80, 200, 255)
    }

    fn background(&self, grid: &mut Grid, lane_edges: &[i32], scroll: usize) {
        let bg = Style::default().bg(BG);
        let full = CellRect { x: 0, y: 0, w: grid.width() as i32, h: grid.height() as i32 };
        grid.fill(full, ' ', bg);

        // Dashed lane markers scroll with the run
        for &x in lane_edges {
            for y in 0..grid.height() {
                let ch = if (y + scroll) % 4 < 2 { '┆' } else { ' ' };
                grid.put(x, y as i32, ch, bg.fg(LANE_LINE));
            }
        }
    }

    fn player(&self, grid: &mut Grid, rect: CellRect, jumping: bool, hurt: bool) {
        let color = if hurt {
            Color::Rgb(255, 80, 80)
        } else if jumping {
            Color::Rgb(255, 220, 80)
        } else {
            Color::Rgb(80, 200, 255)
        };
        grid.fill(rect, '█', Style::default().fg(color).bg(BG));
    }

    fn obstacle(&self, grid: &mut Grid, rect: CellRect, _sprite: Option<SpriteHandle>) {
        grid.fill(rect, '▓', Style::default().fg(Color::Rgb(220, 60, 60)).bg(BG));
    }
}
