use std::time::Duration;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, PlayLayout};
use crate::input::TouchButtons;
use crate::sim::Phase;

use super::field::render_field;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// Widest field that keeps the playfield's proportions inside `area`
fn fit_field(area: Rect, game_width: f32, game_height: f32) -> Rect {
    let ideal = (area.height as f32 * game_width / game_height * CELL_ASPECT).round() as u16;
    let width = ideal.clamp(1, area.width.max(1));
    let x = area.x + area.width.saturating_sub(width) / 2;
    Rect::new(x, area.y, width.min(area.width), area.height)
}

pub fn render_play(frame: &mut Frame, area: Rect, app: &mut App, now: Duration) {
    let accent = app.skin.accent();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(app.skin.title())
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(6),    // Game field
            Constraint::Length(1), // Touch buttons
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let session = &app.session;
    let rules = &app.rules;

    let hearts: String = (0..rules.max_health)
        .map(|i| if i < session.health { '♥' } else { '♡' })
        .collect();
    let status = Line::from(vec![
        Span::styled(format!(" {hearts} "), Style::default().fg(Color::Rgb(255, 80, 100))),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Score: {:05} ", session.score(rules)),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("🏆 Best: {:05} ", app.best_score), Style::default().fg(Color::Cyan)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("⚡ Speed: {:.1} ", session.obstacle_speed(rules)),
            Style::default().fg(Color::Green),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let field = fit_field(chunks[1], rules.game_width, rules.game_height);
    let lines = render_field(
        session,
        rules,
        app.skin.as_ref(),
        now,
        field.width as usize,
        field.height as usize,
    );
    frame.render_widget(Paragraph::new(lines), field);

    let buttons = TouchButtons::layout(Rect::new(field.x, chunks[2].y, field.width, chunks[2].height));
    let button = Style::default()
        .fg(Color::Rgb(15, 15, 25))
        .bg(Color::Rgb(80, 200, 255))
        .add_modifier(Modifier::BOLD);
    for (rect, label) in [(buttons.left, "◀"), (buttons.jump, "▲"), (buttons.right, "▶")] {
        let inset = Rect::new(rect.x, rect.y, rect.width.saturating_sub(1).max(1), rect.height);
        frame.render_widget(Paragraph::new(label).style(button).alignment(Alignment::Center), inset);
    }

    let help = match session.phase {
        Phase::GameOver => Line::from(vec![
            Span::styled(
                " 💀 GAME OVER! ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("Final score: {} ", session.score(rules)),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("│ Space/Enter to restart │ Esc Back", Style::default().fg(Color::DarkGray)),
        ]),
        Phase::NotStarted => Line::from(vec![
            Span::styled(
                " ▶ Press Space or tap to start ",
                Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ Esc Back", Style::default().fg(Color::DarkGray)),
        ]),
        Phase::Playing => match session.pause_remaining(now) {
            Some(left) => Line::from(vec![Span::styled(
                format!(" 💥 HIT! back in {:.1}s ", left.as_secs_f32()),
                Style::default().fg(Color::Rgb(255, 120, 80)).add_modifier(Modifier::BOLD),
            )]),
            None => Line::from(vec![
                Span::styled(" ←→ Lane ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("↑/Space Jump ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("R Restart ", Style::default().fg(Color::DarkGray)),
                Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
                Span::styled("Esc Back", Style::default().fg(Color::DarkGray)),
            ]),
        },
    };
    frame.render_widget(Paragraph::new(help), chunks[3]);

    app.layout = PlayLayout { field, buttons };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keeps_its_proportions() {
        let field = fit_field(Rect::new(0, 1, 100, 30), 360.0, 600.0);
        assert_eq!(field.width, 36);
        assert_eq!(field.x, 32);
        assert_eq!(field.height, 30);

        let narrow = fit_field(Rect::new(4, 0, 10, 30), 360.0, 600.0);
        assert_eq!(narrow, Rect::new(4, 0, 10, 30));
    }
}
