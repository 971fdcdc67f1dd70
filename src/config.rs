//! Command line, rules file and logging setup

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::sim::Rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Colored rectangles
    Classic,
    /// Team select and sprites
    Themed,
}

impl Variant {
    pub fn all() -> &'static [Variant] {
        &[Variant::Classic, Variant::Themed]
    }
}

#[derive(Debug, Parser)]
#[command(name = "lanedash", version, about = "Dodge falling obstacles across three lanes")]
pub struct Cli {
    /// JSON file overriding any of the game rules
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Seed for obstacle spawning (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the title screen
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Directory of `<group>/<name>.txt` sprites overriding the built-in art
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Where log output goes; the terminal belongs to the game
    #[arg(long, value_name = "FILE", default_value = "lanedash.log")]
    pub log_file: PathBuf,

    /// Frame period in milliseconds
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub tick_ms: u64,
}

/// Default rules, or the given file layered over them
pub fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading rules file {}", path.display()))?;
    let rules: Rules = serde_json::from_str(&json)
        .with_context(|| format!("parsing rules file {}", path.display()))?;
    rules
        .validate()
        .with_context(|| format!("invalid rules in {}", path.display()))?;
    Ok(rules)
}

/// env_logger into a file, filtered by RUST_LOG (default `info`)
pub fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_file_means_defaults() {
        assert_eq!(load_rules(None).unwrap(), Rules::default());
    }

    #[test]
    fn file_overrides_named_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "spawn_interval_ms": 1000, "jump_force": -10.0 }}"#).unwrap();

        let rules = load_rules(Some(file.path())).unwrap();
        assert_eq!(rules.spawn_interval_ms, 1000);
        assert_eq!(rules.jump_force, -10.0);
        assert_eq!(rules.collision_pause_ms, 2000);
    }

    #[test]
    fn bad_files_are_reported() {
        let missing = load_rules(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(format!("{missing:#}").contains("reading rules file"));

        let mut garbage = tempfile::NamedTempFile::new().unwrap();
        write!(garbage, "lanes: 3").unwrap();
        let err = load_rules(Some(garbage.path())).unwrap_err();
        assert!(format!("{err:#}").contains("parsing rules file"));

        let mut invalid = tempfile::NamedTempFile::new().unwrap();
        write!(invalid, r#"{{ "lane_count": 0 }}"#).unwrap();
        let err = load_rules(Some(invalid.path())).unwrap_err();
        assert!(format!("{err:#}").contains("lane_count"));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "lanedash", "--variant", "themed", "--seed", "9", "--tick-ms", "20",
        ])
        .unwrap();
        assert_eq!(cli.variant, Some(Variant::Themed));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.tick_ms, 20);
        assert_eq!(cli.log_file, PathBuf::from("lanedash.log"));

        assert!(Cli::try_parse_from(["lanedash", "--tick-ms", "0"]).is_err());
        assert!(Cli::try_parse_from(["lanedash", "--variant", "neon"]).is_err());
    }
}
