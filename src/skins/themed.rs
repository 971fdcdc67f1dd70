use ratatui::prelude::*;

use crate::assets::{Atlas, SpriteHandle, OBSTACLE_SPRITES};

use super::{CellRect, Grid, Skin};

const TURF: Color = Color::Rgb(20, 60, 30);
const TURF_DARK: Color = Color::Rgb(16, 50, 26);

pub struct Team {
    pub name: &'static str,
    pub icon: &'static str,
    pub sprite: &'static str,
    pub color: Color,
    pub motto: &'static str,
}

pub static TEAMS: [Team; 4] = [
    Team { name: "Comets", icon: "☄", sprite: "player/comets", color: Color::Rgb(255, 200, 60), motto: "Fast and\nbright!" },
    Team { name: "Falcons", icon: "🦅", sprite: "player/falcons", color: Color::Rgb(80, 200, 255), motto: "Eyes on\nthe sky!" },
    Team { name: "Tigers", icon: "🐯", sprite: "player/tigers", color: Color::Rgb(255, 130, 40), motto: "Stripes\nnever fold!" },
    Team { name: "Sharks", icon: "🦈", sprite: "player/sharks", color: Color::Rgb(150, 160, 255), motto: "Keep\nmoving!" },
];

const BACKGROUND: &str = "background/pitch";

impl Team {
    /// Sprites a themed run needs before it can start
    pub fn required_assets(&self) -> Vec<String> {
        let mut names = vec![self.sprite.to_string(), BACKGROUND.to_string()];
        names.extend(OBSTACLE_SPRITES.iter().map(|s| s.to_string()));
        names
    }
}

/// Team sprite on a striped pitch
pub struct ThemedSkin {
    team: &'static Team,
    atlas: Atlas,
    player: Option<SpriteHandle>,
    background: Option<SpriteHandle>,
}

impl ThemedSkin {
    pub fn new(team: &'static Team, atlas: Atlas) -> Self {
        let player = atlas.handle(team.sprite);
        let background = atlas.handle(BACKGROUND);
        Self { team, atlas, player, background }
    }

    pub fn obstacle_sprites(&self) -> Vec<SpriteHandle> {
        OBSTACLE_SPRITES.iter().filter_map(|name| self.atlas.handle(name)).collect()
    }
}

impl Skin for ThemedSkin {
    fn title(&self) -> String {
        format!(" {} {} Lane Dash ", self.team.icon, self.team.name)
    }

    fn accent(&self) -> Color {
        self.team.color
    }

    fn background(&self, grid: &mut Grid, lane_edges: &[i32], scroll: usize) {
        // Mowing stripes
        let turf = |y: usize| if ((y + scroll) / 3) % 2 == 0 { TURF } else { TURF_DARK };
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                grid.put(x as i32, y as i32, ' ', Style::default().bg(turf(y)));
            }
        }

        if let Some(sprite) = self.background.and_then(|h| self.atlas.get(h)) {
            let (sw, sh) = (sprite.width().max(1), sprite.height().max(1));
            for y in 0..grid.height() {
                let Some(row) = sprite.rows.get((y + scroll) % sh) else { continue };
                for x in 0..grid.width() {
                    if let Some(ch) = row.chars().nth(x % sw).filter(|c| *c != ' ') {
                        grid.put(x as i32, y as i32, ch, Style::default().fg(sprite.color).bg(turf(y)));
                    }
                }
            }
        }

        for &x in lane_edges {
            for y in 0..grid.height() {
                grid.put(x, y as i32, '│', Style::default().fg(Color::Rgb(200, 220, 200)).bg(turf(y)));
            }
        }
    }

    fn player(&self, grid: &mut Grid, rect: CellRect, jumping: bool, hurt: bool) {
        let color = if hurt { Color::Rgb(255, 80, 80) } else { self.team.color };
        let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if jumping {
            style = style.add_modifier(Modifier::ITALIC);
        }
        match self.player.and_then(|h| self.atlas.get(h)) {
            Some(sprite) => grid.blit(rect, sprite, style),
            None => grid.fill(rect, '█', style),
        }
    }

    fn obstacle(&self, grid: &mut Grid, rect: CellRect, sprite: Option<SpriteHandle>) {
        match sprite.and_then(|h| self.atlas.get(h)) {
            Some(sprite) => {
                let style = Style::default().fg(sprite.color).add_modifier(Modifier::BOLD);
                grid.blit(rect, sprite, style);
            }
            None => grid.fill(rect, '▓', Style::default().fg(Color::Rgb(220, 60, 60))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;

    #[test]
    fn every_team_loads_its_assets() {
        for team in &TEAMS {
            let atlas = AssetLoader::default().load(&team.required_assets()).unwrap();
            let skin = ThemedSkin::new(team, atlas);
            assert!(skin.player.is_some());
            assert!(skin.background.is_some());
            assert_eq!(skin.obstacle_sprites().len(), OBSTACLE_SPRITES.len());
        }
    }

    #[test]
    fn player_sprite_is_centered_in_its_box() {
        let team = &TEAMS[0];
        let atlas = AssetLoader::default().load(&team.required_assets()).unwrap();
        let skin = ThemedSkin::new(team, atlas);
        let mut grid = Grid::new(7, 3);
        skin.player(&mut grid, CellRect { x: 1, y: 0, w: 5, h: 3 }, false, false);
        assert_eq!(grid.row_text(1), " ▐███▌ ");
    }

    #[test]
    fn missing_sprite_falls_back_to_a_block() {
        let skin = ThemedSkin::new(&TEAMS[1], Atlas::default());
        let mut grid = Grid::new(3, 1);
        skin.obstacle(&mut grid, CellRect { x: 0, y: 0, w: 2, h: 1 }, None);
        assert_eq!(grid.row_text(0), "▓▓ ");
    }
}
