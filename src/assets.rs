//! Sprite assets
//!
//! Sprites are small blocks of glyph art resolved by name into an `Atlas`.
//! The game only ever holds `SpriteHandle`s; the skins look them up when
//! drawing. Loading runs on a one-shot thread so the title screen stays
//! responsive, and play does not begin until every requested name resolved.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::{anyhow, Context, Result};
use ratatui::style::Color;

/// Opaque reference to a sprite in an `Atlas`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(usize);

impl SpriteHandle {
    #[cfg(test)]
    pub fn new(index: usize) -> Self {
        SpriteHandle(index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub rows: Vec<String>,
    pub color: Color,
}

impl Sprite {
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

struct Builtin {
    name: &'static str,
    rows: &'static [&'static str],
    color: Color,
}

const BUILTIN: [Builtin; 8] = [
    Builtin { name: "player/comets", rows: &[" ▄█▄ ", "▐███▌", " ▘ ▝ "], color: Color::Rgb(255, 200, 60) },
    Builtin { name: "player/falcons", rows: &["▗▄█▄▖", " ███ ", " ▘ ▝ "], color: Color::Rgb(80, 200, 255) },
    Builtin { name: "player/tigers", rows: &["▚▄█▄▞", "▐███▌", " ▘ ▝ "], color: Color::Rgb(255, 130, 40) },
    Builtin { name: "player/sharks", rows: &["  ▲  ", "◢███◣", " ▘ ▝ "], color: Color::Rgb(150, 160, 255) },
    Builtin { name: "obstacle/ball", rows: &[" ▄▄ ", "████", " ▀▀ "], color: Color::Rgb(240, 240, 240) },
    Builtin { name: "obstacle/cone", rows: &[" ▲ ", "▟█▙", "▀▀▀"], color: Color::Rgb(255, 120, 40) },
    Builtin { name: "obstacle/crate", rows: &["╔══╗", "║╳╳║", "╚══╝"], color: Color::Rgb(190, 140, 80) },
    Builtin { name: "background/pitch", rows: &["  ·   ", "      ", "    · "], color: Color::Rgb(40, 90, 50) },
];

/// Every obstacle sprite name, in the order themed runs use them
pub const OBSTACLE_SPRITES: [&str; 3] = ["obstacle/ball", "obstacle/cone", "obstacle/crate"];

/// Resolved sprites, addressed by handle
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    sprites: Vec<Sprite>,
    names: HashMap<String, SpriteHandle>,
}

impl Atlas {
    pub fn get(&self, handle: SpriteHandle) -> Option<&Sprite> {
        self.sprites.get(handle.0)
    }

    pub fn handle(&self, name: &str) -> Option<SpriteHandle> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    fn insert(&mut self, name: &str, sprite: Sprite) -> SpriteHandle {
        if let Some(handle) = self.handle(name) {
            return handle;
        }
        let handle = SpriteHandle(self.sprites.len());
        self.sprites.push(sprite);
        self.names.insert(name.to_string(), handle);
        handle
    }
}

/// Resolves sprite names. A sprite directory, when given, overrides the
/// built-in art with `<dir>/<group>/<name>.txt` files.
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    dir: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    fn read_override(&self, name: &str) -> Result<Option<Vec<String>>> {
        let Some(dir) = &self.dir else { return Ok(None) };
        let path = dir.join(format!("{name}.txt"));
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading sprite {}", path.display()))?;
        let rows: Vec<String> = text.lines().map(str::to_string).collect();
        if rows.iter().all(|r| r.trim().is_empty()) {
            return Err(anyhow!("sprite file {} is empty", path.display()));
        }
        Ok(Some(rows))
    }

    fn resolve(&self, name: &str) -> Result<Sprite> {
        let builtin = BUILTIN.iter().find(|b| b.name == name);
        let color = builtin.map(|b| b.color).unwrap_or(Color::White);

        if let Some(rows) = self.read_override(name)? {
            return Ok(Sprite { rows, color });
        }
        match builtin {
            Some(b) => Ok(Sprite {
                rows: b.rows.iter().map(|r| r.to_string()).collect(),
                color,
            }),
            None => Err(anyhow!("unknown sprite '{name}'")),
        }
    }

    /// Resolve every name or fail on the first one that can't be found
    pub fn load(&self, names: &[String]) -> Result<Atlas> {
        let mut atlas = Atlas::default();
        for name in names {
            let sprite = self.resolve(name)?;
            atlas.insert(name, sprite);
        }
        log::info!("Loaded {} sprite(s)", atlas.len());
        Ok(atlas)
    }

    /// Load on a background thread
    pub fn spawn(&self, names: Vec<String>) -> PendingAssets {
        let (tx, rx) = mpsc::channel();
        let loader = self.clone();
        thread::spawn(move || {
            let _ = tx.send(loader.load(&names));
        });
        PendingAssets { rx }
    }
}

/// A load in flight
pub struct PendingAssets {
    rx: Receiver<Result<Atlas>>,
}

impl PendingAssets {
    /// `None` while still loading
    pub fn poll(&self) -> Option<Result<Atlas>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(anyhow!("asset loader exited"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builtins_resolve_to_distinct_handles() {
        let atlas = AssetLoader::default()
            .load(&names(&["player/comets", "obstacle/ball", "obstacle/cone"]))
            .unwrap();
        assert_eq!(atlas.len(), 3);
        let ball = atlas.handle("obstacle/ball").unwrap();
        let cone = atlas.handle("obstacle/cone").unwrap();
        assert_ne!(ball, cone);
        assert_eq!(atlas.get(ball).unwrap().height(), 3);
        assert_eq!(atlas.get(ball).unwrap().width(), 4);
    }

    #[test]
    fn duplicate_names_share_a_handle() {
        let atlas = AssetLoader::default()
            .load(&names(&["obstacle/crate", "obstacle/crate"]))
            .unwrap();
        assert_eq!(atlas.len(), 1);
    }

    #[test]
    fn unknown_name_fails() {
        let err = AssetLoader::default()
            .load(&names(&["player/comets", "player/unicorns"]))
            .unwrap_err();
        assert!(err.to_string().contains("player/unicorns"));
    }

    #[test]
    fn directory_overrides_builtin_art() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("obstacle")).unwrap();
        fs::write(dir.path().join("obstacle/ball.txt"), "()\n()\n").unwrap();
        fs::create_dir(dir.path().join("player")).unwrap();
        fs::write(dir.path().join("player/robots.txt"), "[]\n").unwrap();

        let loader = AssetLoader::new(Some(dir.path().to_path_buf()));
        let atlas = loader
            .load(&names(&["obstacle/ball", "player/robots", "obstacle/cone"]))
            .unwrap();

        let ball = atlas.get(atlas.handle("obstacle/ball").unwrap()).unwrap();
        assert_eq!(ball.rows, vec!["()", "()"]);
        assert_eq!(ball.color, Color::Rgb(240, 240, 240));
        let robot = atlas.get(atlas.handle("player/robots").unwrap()).unwrap();
        assert_eq!(robot.color, Color::White);
        assert_eq!(atlas.get(atlas.handle("obstacle/cone").unwrap()).unwrap().height(), 3);
    }

    #[test]
    fn empty_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("obstacle")).unwrap();
        fs::write(dir.path().join("obstacle/ball.txt"), "\n  \n").unwrap();
        let loader = AssetLoader::new(Some(dir.path().to_path_buf()));
        assert!(loader.load(&names(&["obstacle/ball"])).is_err());
    }

    #[test]
    fn background_load_delivers_once() {
        let pending = AssetLoader::default().spawn(names(&OBSTACLE_SPRITES));
        let mut result = None;
        for _ in 0..200 {
            if let Some(r) = pending.poll() {
                result = Some(r);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        let atlas = result.expect("loader finished").unwrap();
        assert_eq!(atlas.len(), OBSTACLE_SPRITES.len());
        // Sender is gone after the one result
        assert!(matches!(pending.poll(), Some(Err(_))));
    }
}
