pub mod field;
pub mod play;
pub mod team_select;
pub mod title;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};
use crate::config::Variant;
use crate::skins::TEAMS;

const SPINNER: [char; 8] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧'];

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let now = app.now();
    match app.screen {
        Screen::Title => title::render_title(
            frame,
            area,
            app.selected_variant,
            app.best_score,
            app.load_error.as_deref(),
        ),
        Screen::TeamSelect => team_select::render_team_select(frame, area, app.selected_team),
        Screen::Loading => {
            let what = match app.variant {
                Variant::Classic => "Classic".to_string(),
                Variant::Themed => TEAMS[app.selected_team].name.to_string(),
            };
            let frame_idx = (now.as_millis() / 80) as usize % SPINNER.len();
            render_loading(frame, area, &what, SPINNER[frame_idx]);
        }
        Screen::Play => play::render_play(frame, area, app, now),
    }
}

fn render_loading(frame: &mut Frame, area: Rect, what: &str, spinner: char) {
    let overlay_w = 36u16.min(area.width.saturating_sub(4));
    let overlay_h = 5u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .title(" Loading ")
        .title_style(Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{spinner} "), Style::default().fg(Color::Rgb(255, 220, 80))),
            Span::styled(format!("Preparing {what}..."), Style::default().fg(Color::Rgb(200, 200, 220))),
        ]),
        Line::from(Span::styled("Esc to cancel", Style::default().fg(Color::Rgb(100, 100, 120)))),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
