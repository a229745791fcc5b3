use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use collapse_core::{Coord2, MoveOutcome, PlayEngine, Region};

use command::{Command, CommandError, HELP};
use config::{FileConfig, Overrides};
use render::{Snapshot, render};

mod command;
mod config;
mod logger;
mod render;

/// Collapse the grid: clear same-colored groups from the bottom row before the moves run out.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Play a random layout generated from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Random layout size as ROWSxCOLS
    #[arg(long, value_parser = config::parse_size)]
    size: Option<Coord2>,

    /// Number of palette colors in a random layout
    #[arg(long)]
    colors: Option<u8>,

    /// Moves per attempt
    #[arg(long)]
    budget: Option<u16>,

    /// Accept clicks on every row, not only the bottom one
    #[arg(long)]
    anywhere: bool,

    /// Award points for removed tiles
    #[arg(long)]
    scoring: bool,

    /// Keep playing single tiles once no two adjacent tiles share a color
    #[arg(long)]
    keep_going: bool,

    /// Print a JSON snapshot after every command instead of the text view
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            size: self.size,
            colors: self.colors,
            move_budget: self.budget,
            anywhere: self.anywhere,
            scoring: self.scoring,
            keep_going: self.keep_going,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn show(
    out: &mut impl Write,
    engine: &PlayEngine,
    highlight: &Region,
    json: bool,
) -> io::Result<()> {
    if json {
        let snapshot = serde_json::to_string(&Snapshot::of(engine)).map_err(io::Error::other)?;
        writeln!(out, "{snapshot}")
    } else {
        write!(out, "{}", render(engine, highlight))
    }
}

/// Messages for the player. In JSON mode they go to stderr so stdout carries one snapshot per line.
fn notice(out: &mut impl Write, json: bool, message: fmt::Arguments<'_>) -> io::Result<()> {
    if json {
        writeln!(io::stderr().lock(), "{message}")
    } else {
        writeln!(out, "{message}")
    }
}

fn click(
    engine: &mut PlayEngine,
    coords: Coord2,
    out: &mut impl Write,
    json: bool,
) -> io::Result<()> {
    if let Err(reason) = engine.check_move(coords) {
        return notice(out, json, format_args!("Cannot click {coords:?}: {reason}"));
    }

    match engine.attempt_move(coords) {
        MoveOutcome::Cleared => log::info!("cleared on attempt {}", engine.attempt()),
        MoveOutcome::Exhausted => log::info!("exhausted on attempt {}", engine.attempt()),
        outcome => log::debug!("{coords:?}: {outcome:?}"),
    }
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input, drawing the session after each one.
fn play(
    engine: &mut PlayEngine,
    input: impl BufRead,
    out: &mut impl Write,
    json: bool,
) -> io::Result<()> {
    show(out, engine, &Region::new(), json)?;

    for line in input.lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                notice(out, json, format_args!("{err}"))?;
                continue;
            }
        };

        let mut highlight = Region::new();
        match command {
            Command::Quit => break,
            Command::Help => {
                notice(out, json, format_args!("{HELP}"))?;
                continue;
            }
            Command::ClickColumn(col) => {
                let row = engine.grid().bottom_row();
                click(engine, (row, col), out, json)?;
            }
            Command::Click(coords) => click(engine, coords, out, json)?,
            Command::Peek(coords) => match engine.check_move(coords) {
                Ok(()) => highlight = engine.preview(coords),
                Err(reason) => {
                    notice(out, json, format_args!("Cannot click {coords:?}: {reason}"))?
                }
            },
            Command::Reset => engine.reset(),
            Command::New => engine.new_game(),
            Command::Next => {
                if let Err(err) = engine.advance_level() {
                    notice(out, json, format_args!("{err}"))?;
                }
            }
        }

        show(out, engine, &highlight, json)?;
    }

    out.flush()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter()).context("cannot install logger")?;

    let fallback_seed = clock_seed();
    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display()))?,
        None => FileConfig::default(),
    };
    let config = file_config.into_game_config(fallback_seed)?;
    let config = args.overrides().apply(config, fallback_seed)?;
    log::info!(
        "starting {}x{} game, {} moves, {:?}",
        config.size().0,
        config.size().1,
        config.move_budget,
        config.click_policy
    );

    let mut engine = PlayEngine::new(config).context("cannot start game")?;
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    play(&mut engine, stdin.lock(), &mut stdout, args.json)?;
    Ok(())
}
