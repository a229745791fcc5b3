use std::fmt::Write;

use collapse_core::{Cell, Phase, PlayEngine, Region, try_label};
use serde::Serialize;

/// What the host shows after every command, also emitted as JSON with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub rows: Vec<String>,
    pub moves_remaining: u16,
    pub attempt: u32,
    pub try_label: String,
    pub phase: Phase,
    pub stuck: bool,
    pub score: Option<u32>,
    pub level: u32,
}

impl Snapshot {
    pub fn of(engine: &PlayEngine) -> Self {
        Self {
            rows: engine.grid().to_text_rows(),
            moves_remaining: engine.moves_remaining(),
            attempt: engine.attempt(),
            try_label: try_label(engine.attempt()),
            phase: engine.phase(),
            stuck: engine.is_stuck(),
            score: engine.config().scoring.map(|_| engine.score()),
            level: engine.level(),
        }
    }
}

fn moves_header(moves: u16) -> String {
    match moves {
        1 => "1 move left".to_string(),
        n => format!("{n} moves left"),
    }
}

/// Text view of the session. Cells in `highlight` are drawn in lower case.
pub fn render(engine: &PlayEngine, highlight: &Region) -> String {
    let grid = engine.grid();
    let mut out = String::new();

    let _ = writeln!(out, "{}", moves_header(engine.moves_remaining()));
    if let Some(rules) = engine.config().scoring {
        let _ = writeln!(
            out,
            "score {}  level {}  ({} per tile)",
            engine.score(),
            engine.level(),
            rules.points_per_cell
        );
    }

    out.push_str("\n    ");
    for col in 0..grid.cols() {
        let _ = write!(out, "{col:>2}");
    }
    out.push('\n');

    for row in 0..grid.rows() {
        let marker = if row == grid.bottom_row() { '>' } else { ' ' };
        let _ = write!(out, "{marker}{row:>2} ");
        for (col, cell) in grid.row(row).enumerate() {
            let symbol = match cell {
                Cell::Empty => Cell::EMPTY_SYMBOL,
                cell if highlight.contains(&(row, col as u8)) => cell.symbol().to_ascii_lowercase(),
                cell => cell.symbol(),
            };
            let _ = write!(out, " {symbol}");
        }
        out.push('\n');
    }
    out.push('\n');

    match engine.phase() {
        Phase::Playing if engine.is_stuck() && engine.config().end_on_terminal => {
            out.push_str("No more moves! Try again with `reset`.\n");
        }
        Phase::Playing if engine.is_stuck() => {
            out.push_str("No matching neighbors left, single tiles only.\n");
        }
        Phase::Playing if engine.attempt() > 1 => {
            let _ = writeln!(out, "{}", try_label(engine.attempt()));
        }
        Phase::Playing => {}
        Phase::Exhausted => {
            out.push_str("Out of moves! Try again with `reset`.\n");
        }
        Phase::Cleared => {
            let _ = writeln!(out, "Grid cleared on the {}!", try_label(engine.attempt()));
        }
    }

    out
}
