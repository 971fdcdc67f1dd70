use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::skins::TEAMS;

use super::title::{render_tile, Tile};

pub fn render_team_select(frame: &mut Frame, area: Rect, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(120, 220, 120)))
        .title(" 🏟 Pick Your Team ")
        .title_style(Style::default().fg(Color::Rgb(120, 220, 120)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[0]);

    let keys = ["1", "2", "3", "4"];
    for (i, team) in TEAMS.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
            .split(rows[i / 2]);
        let tile = Tile {
            key: keys[i],
            icon: team.icon,
            name: team.name,
            desc: team.motto,
            color: team.color,
            border_color: Color::Rgb(60, 60, 80),
        };
        render_tile(frame, cols[i % 2], &tile, selected == i);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" ←→ Select ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("1-4 / Enter Pick ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc Back", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[1]);
}
