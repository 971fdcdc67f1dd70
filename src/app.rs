use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;

use crate::assets::{AssetLoader, PendingAssets};
use crate::config::Variant;
use crate::input::{action_for_key, action_for_touch, TouchButtons};
use crate::sim::{apply_action, update, Action, Frame, Phase, Rules, Session};
use crate::skins::{ClassicSkin, Skin, ThemedSkin, TEAMS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    TeamSelect,
    Loading,
    Play,
}

/// Where the play screen put its clickable areas on the last draw
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayLayout {
    pub field: Rect,
    pub buttons: TouchButtons,
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub selected_variant: usize,
    pub selected_team: usize,
    pub variant: Variant,
    pub rules: Rules,
    pub session: Session,
    pub skin: Box<dyn Skin>,
    pub best_score: u32,
    pub layout: PlayLayout,
    pub load_error: Option<String>,
    loader: AssetLoader,
    pending: Option<PendingAssets>,
    rng: StdRng,
    epoch: Instant,
}

impl App {
    pub fn new(rules: Rules, loader: AssetLoader, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            should_quit: false,
            screen: Screen::Title,
            selected_variant: 0,
            selected_team: 0,
            variant: Variant::Classic,
            session: Session::new(&rules),
            rules,
            skin: Box::new(ClassicSkin),
            best_score: 0,
            layout: PlayLayout::default(),
            load_error: None,
            loader,
            pending: None,
            rng,
            epoch: Instant::now(),
        }
    }

    /// Time since the app started; all session timestamps use this clock
    pub fn now(&self) -> Duration {
        self.epoch.elapsed()
    }

    fn clock(&self, at: Instant) -> Duration {
        at.saturating_duration_since(self.epoch)
    }

    /// Whether the scheduler should deliver another tick
    pub fn wants_frame(&self) -> bool {
        match self.screen {
            Screen::Loading => true,
            Screen::Play => self.session.is_playing(),
            Screen::Title | Screen::TeamSelect => false,
        }
    }

    pub fn on_tick(&mut self, at: Instant) {
        let now = self.clock(at);
        match self.screen {
            Screen::Loading => self.poll_assets(),
            Screen::Play => {
                let was_playing = self.session.is_playing();
                let frame = update(&mut self.session, &self.rules, &mut self.rng, now);
                if was_playing && frame == Frame::Stop {
                    self.finish_run();
                }
            }
            Screen::Title | Screen::TeamSelect => {}
        }
    }

    pub fn choose_variant(&mut self, variant: Variant) {
        self.variant = variant;
        self.selected_variant = Variant::all().iter().position(|v| *v == variant).unwrap_or(0);
        match variant {
            Variant::Classic => self.begin_loading(Vec::new()),
            Variant::Themed => self.screen = Screen::TeamSelect,
        }
    }

    fn choose_team(&mut self, idx: usize) {
        self.selected_team = idx % TEAMS.len();
        self.begin_loading(TEAMS[self.selected_team].required_assets());
    }

    fn begin_loading(&mut self, names: Vec<String>) {
        log::info!("Loading {:?} assets: {:?}", self.variant, names);
        self.load_error = None;
        self.pending = Some(self.loader.spawn(names));
        self.screen = Screen::Loading;
    }

    fn poll_assets(&mut self) {
        let Some(result) = self.pending.as_ref().and_then(|p| p.poll()) else {
            return;
        };
        self.pending = None;
        match result {
            Ok(atlas) => {
                let mut session = Session::new(&self.rules);
                match self.variant {
                    Variant::Classic => self.skin = Box::new(ClassicSkin),
                    Variant::Themed => {
                        let skin = ThemedSkin::new(&TEAMS[self.selected_team], atlas);
                        session = session.with_obstacle_sprites(skin.obstacle_sprites());
                        self.skin = Box::new(skin);
                    }
                }
                self.session = session;
                self.screen = Screen::Play;
            }
            Err(err) => {
                log::warn!("Asset loading failed: {err:#}");
                self.load_error = Some(format!("{err:#}"));
                self.screen = Screen::Title;
            }
        }
    }

    fn finish_run(&mut self) {
        let score = self.session.score(&self.rules);
        if score > self.best_score {
            log::info!("New best score {} (was {})", score, self.best_score);
            self.best_score = score;
        }
    }

    fn leave_play(&mut self) {
        self.session = Session::new(&self.rules);
        self.screen = Screen::Title;
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Title => self.on_title_key(key),
            Screen::TeamSelect => self.on_team_key(key),
            Screen::Loading => {
                if key.code == KeyCode::Esc {
                    self.pending = None;
                    self.screen = Screen::Title;
                }
            }
            Screen::Play => self.on_play_key(key),
        }
    }

    fn on_title_key(&mut self, key: KeyEvent) {
        let count = Variant::all().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('1') => self.choose_variant(Variant::Classic),
            KeyCode::Char('2') => self.choose_variant(Variant::Themed),
            KeyCode::Right | KeyCode::Down => {
                self.selected_variant = (self.selected_variant + 1) % count;
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_variant = (self.selected_variant + count - 1) % count;
            }
            KeyCode::Enter => self.choose_variant(Variant::all()[self.selected_variant]),
            _ => {}
        }
    }

    fn on_team_key(&mut self, key: KeyEvent) {
        let count = TEAMS.len();
        match key.code {
            KeyCode::Esc => self.screen = Screen::Title,
            KeyCode::Right | KeyCode::Down => {
                self.selected_team = (self.selected_team + 1) % count;
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_team = (self.selected_team + count - 1) % count;
            }
            KeyCode::Char(c @ '1'..='4') => self.choose_team(c as usize - '1' as usize),
            KeyCode::Enter => self.choose_team(self.selected_team),
            _ => {}
        }
    }

    fn on_play_key(&mut self, key: KeyEvent) {
        let now = self.now();
        match key.code {
            KeyCode::Esc => {
                self.leave_play();
                return;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.restart(&self.rules, now);
                return;
            }
            _ => {}
        }

        match self.session.phase {
            Phase::NotStarted => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter) {
                    self.session.start(now);
                }
            }
            Phase::GameOver => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.session.restart(&self.rules, now);
                }
            }
            Phase::Playing => {
                if let Some(action) = action_for_key(&key) {
                    self.act(action, now);
                }
            }
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Play || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let now = self.now();
        let action = self
            .layout
            .buttons
            .hit(mouse.column, mouse.row)
            .or_else(|| action_for_touch(self.layout.field, mouse.column, mouse.row));
        let Some(action) = action else { return };

        match self.session.phase {
            Phase::NotStarted => self.session.start(now),
            Phase::GameOver => self.session.restart(&self.rules, now),
            Phase::Playing => self.act(action, now),
        }
    }

    fn act(&mut self, action: Action, now: Duration) {
        apply_action(&mut self.session, &self.rules, action, now);
    }
}
