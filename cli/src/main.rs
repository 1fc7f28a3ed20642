//! Minefield terminal driver
//!
//! Reads one command per line from stdin and prints the board after each.

mod command;
mod config;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use command::{Command, USAGE};
use config::{CliArgs, SeedSource, Settings};
use minefield_core::Board;
use render::{Snapshot, TextBoard};

fn main() -> Result<()> {
    let args = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let settings = Settings::load(&args)?;
    log::debug!("Settings: {:?}", settings);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(settings)?.run(stdin.lock(), stdout.lock())
}

struct Session {
    settings: Settings,
    seeds: SeedSource,
    board: Board,
}

impl Session {
    fn new(settings: Settings) -> Result<Self> {
        let mut seeds = SeedSource::new(settings.seed);
        let seed = seeds.next_seed();
        log::info!("Starting game with seed {}", seed);
        let board = Board::new(settings.game, seed).context("failed to create board")?;

        Ok(Self {
            settings,
            seeds,
            board,
        })
    }

    fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        self.print_board(&mut output)?;

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if line.trim().is_empty() {
                continue;
            }

            let Some(command) = Command::parse(&line) else {
                writeln!(output, "{}", USAGE)?;
                continue;
            };
            if command == Command::Quit {
                break;
            }

            match self.apply(command) {
                Ok(true) => self.print_board(&mut output)?,
                Ok(false) => writeln!(output, "nothing changed")?,
                Err(err) => {
                    log::warn!("Rejected {:?}: {}", command, err);
                    writeln!(output, "{}", err)?;
                }
            }
        }

        output.flush()?;
        Ok(())
    }

    /// Runs one move, returning whether the board changed.
    fn apply(&mut self, command: Command) -> Result<bool> {
        let updated = match command {
            Command::Reveal(coords) => {
                let outcome = self.board.reveal(coords)?;
                log::debug!("Reveal at {:?}: {:?}", coords, outcome);
                outcome.has_update()
            }
            Command::Flag(coords) => self.board.toggle_flag(coords)?.has_update(),
            Command::NewGame => {
                let seed = self.seeds.next_seed();
                log::info!("Starting game with seed {}", seed);
                self.board.initialize(self.board.config(), seed)?;
                true
            }
            Command::Quit => false,
        };
        Ok(updated)
    }

    fn print_board(&self, output: &mut impl Write) -> Result<()> {
        if self.settings.json {
            serde_json::to_writer(&mut *output, &Snapshot::from_board(&self.board))?;
            writeln!(output)?;
        } else {
            write!(output, "{}", TextBoard(&self.board))?;
        }
        Ok(())
    }
}
