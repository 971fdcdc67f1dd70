//! Renderers for the two variants
//!
//! The play field is painted into a character `Grid` (playfield units are
//! already mapped to cells by the caller). A `Skin` decides what the
//! background, the player and the obstacles look like.

pub mod classic;
pub mod themed;

use ratatui::prelude::*;

use crate::assets::{Sprite, SpriteHandle};

pub use classic::ClassicSkin;
pub use themed::{Team, ThemedSkin, TEAMS};

pub type Cell = (char, Style);

/// Cell-space rectangle; may hang off the grid edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

pub struct Grid {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![(' ', Style::default()); width]; height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn put(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize][x as usize] = (ch, style);
        }
    }

    pub fn fill(&mut self, rect: CellRect, ch: char, style: Style) {
        for y in rect.y..rect.y + rect.h {
            for x in rect.x..rect.x + rect.w {
                self.put(x, y, ch, style);
            }
        }
    }

    /// Draw a sprite centered in `rect`, clipped to it. Spaces are transparent.
    pub fn blit(&mut self, rect: CellRect, sprite: &Sprite, style: Style) {
        let sw = sprite.width() as i32;
        let sh = sprite.height() as i32;
        let ox = rect.x + (rect.w - sw) / 2;
        let oy = rect.y + (rect.h - sh) / 2;
        for (dy, row) in sprite.rows.iter().enumerate() {
            let y = oy + dy as i32;
            if y < rect.y || y >= rect.y + rect.h {
                continue;
            }
            for (dx, ch) in row.chars().enumerate() {
                let x = ox + dx as i32;
                if ch != ' ' && x >= rect.x && x < rect.x + rect.w {
                    self.put(x, y, ch, style);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn row_text(&self, y: usize) -> String {
        self.cells[y].iter().map(|(ch, _)| *ch).collect()
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        self.cells
            .into_iter()
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .into_iter()
                    .map(|(ch, style)| Span::styled(String::from(ch), style))
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

pub trait Skin {
    fn title(&self) -> String;
    fn accent(&self) -> Color;
    /// Paint the whole grid; `lane_edges` are the columns between lanes
    fn background(&self, grid: &mut Grid, lane_edges: &[i32], scroll: usize);
    fn player(&self, grid: &mut Grid, rect: CellRect, jumping: bool, hurt: bool);
    fn obstacle(&self, grid: &mut Grid, rect: CellRect, sprite: Option<SpriteHandle>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_ignores_out_of_bounds() {
        let mut grid = Grid::new(3, 2);
        grid.put(-1, 0, 'x', Style::default());
        grid.put(3, 0, 'x', Style::default());
        grid.put(0, 2, 'x', Style::default());
        grid.put(2, 1, 'x', Style::default());
        assert_eq!(grid.row_text(0), "   ");
        assert_eq!(grid.row_text(1), "  x");
    }

    #[test]
    fn blit_centers_and_clips() {
        let sprite = Sprite {
            rows: vec!["ab".into(), "c d".into()],
            color: Color::White,
        };
        let mut grid = Grid::new(7, 3);
        grid.blit(CellRect { x: 1, y: 0, w: 5, h: 3 }, &sprite, Style::default());
        assert_eq!(grid.row_text(0), "  ab   ");
        assert_eq!(grid.row_text(1), "  c d  ");
        assert_eq!(grid.row_text(2), "       ");

        let mut small = Grid::new(4, 1);
        small.blit(CellRect { x: 0, y: 0, w: 2, h: 1 }, &sprite, Style::default());
        assert_eq!(small.row_text(0), "ab  ");
    }
}
