use ratatui::prelude::*;
use ratatui::widgets::*;

const BANNER: &str = r#"
 ██╗      █████╗ ███╗   ██╗███████╗    ██████╗  █████╗ ███████╗██╗  ██╗
 ██║     ██╔══██╗████╗  ██║██╔════╝    ██╔══██╗██╔══██╗██╔════╝██║  ██║
 ██║     ███████║██╔██╗ ██║█████╗      ██║  ██║███████║███████╗███████║
 ██║     ██╔══██║██║╚██╗██║██╔══╝      ██║  ██║██╔══██║╚════██║██╔══██║
 ███████╗██║  ██║██║ ╚████║███████╗    ██████╔╝██║  ██║███████║██║  ██║
 ╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝╚══════╝    ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝"#;

pub struct Tile<'a> {
    pub key: &'a str,
    pub icon: &'a str,
    pub name: &'a str,
    pub desc: &'a str,
    pub color: Color,
    pub border_color: Color,
}

const VARIANT_TILES: [Tile<'static>; 2] = [
    Tile { key: "1", icon: "▦", name: "Classic", desc: "Blocks fall,\nyou dodge!", color: Color::Rgb(80, 200, 255), border_color: Color::Rgb(40, 100, 140) },
    Tile { key: "2", icon: "🏟", name: "Team Dash", desc: "Pick a team,\nrun the pitch!", color: Color::Rgb(120, 220, 120), border_color: Color::Rgb(50, 110, 50) },
];

pub fn render_tile(frame: &mut Frame, area: Rect, tile: &Tile, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(vec![
            Span::styled(desc_line, Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) })),
        ]));
    }

    if selected {
        lines.push(Line::from(vec![
            Span::styled("▶ Enter to play", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

pub fn render_title(frame: &mut Frame, area: Rect, selected: usize, best_score: u32, load_error: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),  // Banner
            Constraint::Min(7),     // Variant tiles
            Constraint::Length(9),  // Controls
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let modes_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🕹 Choose a Mode ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let modes_inner = modes_block.inner(chunks[1]);
    frame.render_widget(modes_block, chunks[1]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(modes_inner);
    for (i, tile) in VARIANT_TILES.iter().enumerate() {
        render_tile(frame, cols[i], tile, selected == i);
    }

    let key = Style::default().fg(Color::Rgb(80, 200, 255));
    let label = Style::default().fg(Color::Rgb(140, 140, 140));
    let controls = Paragraph::new(vec![
        Line::from(vec![Span::styled("    ← →            ", key), Span::styled("Change lane", label)]),
        Line::from(vec![Span::styled("    ↑ / Space      ", key), Span::styled("Jump over obstacles", label)]),
        Line::from(vec![Span::styled("    Click field    ", key), Span::styled("Left third · middle jump · right third", label)]),
        Line::from(vec![Span::styled("    R              ", key), Span::styled("Restart run", label)]),
        Line::from(vec![Span::styled("    Esc            ", key), Span::styled("Back", label)]),
        Line::from(vec![Span::styled("    q / Ctrl+C     ", key), Span::styled("Quit", label)]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Controls ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, chunks[2]);

    let footer = match load_error {
        Some(err) => Line::from(vec![
            Span::styled("  ⚠ ", Style::default().fg(Color::Rgb(255, 80, 80))),
            Span::styled(format!("Could not load sprites: {err}"), Style::default().fg(Color::Rgb(255, 120, 120))),
        ]),
        None => Line::from(vec![
            Span::styled("  🏆 Best: ", Style::default().fg(Color::Rgb(80, 80, 100))),
            Span::styled(format!("{best_score:05}"), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]),
    };
    frame.render_widget(Paragraph::new(footer).alignment(Alignment::Center), chunks[3]);
}
