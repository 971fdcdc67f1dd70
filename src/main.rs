mod app;
mod assets;
mod config;
mod event;
mod input;
mod sim;
mod skins;
mod ui;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use assets::AssetLoader;
use config::Cli;
use event::{Event, EventHandler};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = config::init_logging(&cli.log_file) {
        eprintln!("lanedash: logging disabled: {err:#}");
    }
    let rules = config::load_rules(cli.rules.as_deref())?;
    log::info!("Starting with {:?}", rules);

    let mut app = App::new(rules, AssetLoader::new(cli.assets.clone()), cli.seed);
    if let Some(variant) = cli.variant {
        app.choose_variant(variant);
    }

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut events = EventHandler::new(cli.tick_ms);
    let result = run(&mut terminal, &mut app, &events);

    // Restore terminal even when the loop failed
    events.stop();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if app.best_score > 0 {
        log::info!("Best score this session: {}", app.best_score);
    }
    result
}

fn run(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        if app.wants_frame() {
            events.request_frame();
        } else {
            events.cancel_frame();
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next().context("reading terminal events")? {
            Event::Tick(at) => app.on_tick(at),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::Resize => terminal.autoresize()?,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
