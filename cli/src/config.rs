use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minefield_core::{CellCount, Coord, GameConfig};
use serde::Deserialize;

/// Play minesweeper on the terminal, one command per line.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct CliArgs {
    /// Path to a TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of rows
    #[arg(long, value_name = "ROWS")]
    pub rows: Option<Coord>,

    /// Number of columns
    #[arg(long, value_name = "COLS")]
    pub cols: Option<Coord>,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long, value_name = "MINES")]
    pub mines: Option<CellCount>,

    /// Seed for mine placement; the clock is used when absent
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Print a JSON snapshot after every command instead of the text board
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

/// Keys accepted in the settings file, all optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Settings after layering defaults < file < command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub game: GameConfig,
    pub seed: Option<u64>,
    pub json: bool,
}

impl Settings {
    pub fn load(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    pub fn merge(args: &CliArgs, file: FileConfig) -> Result<Self> {
        let defaults = GameConfig::default();
        let rows = args.rows.or(file.rows).unwrap_or(defaults.rows());
        let cols = args.cols.or(file.cols).unwrap_or(defaults.cols());
        let mines = args.mines.or(file.mines).unwrap_or(defaults.mines);

        let game = GameConfig::new((rows, cols), mines)
            .with_context(|| format!("cannot play {rows}x{cols} with {mines} mines"))?;

        Ok(Self {
            game,
            seed: args.seed.or(file.seed),
            json: args.json,
        })
    }
}

/// Hands out one seed per game: the fixed seed and its successors, or the clock.
#[derive(Debug)]
pub struct SeedSource {
    next: Option<u64>,
}

impl SeedSource {
    pub fn new(seed: Option<u64>) -> Self {
        Self { next: seed }
    }

    pub fn next_seed(&mut self) -> u64 {
        match &mut self.next {
            Some(seed) => {
                let current = *seed;
                *seed = seed.wrapping_add(1);
                current
            }
            None => clock_seed(),
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
