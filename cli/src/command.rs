use std::str::FromStr;

use collapse_core::{Coord, Coord2};

pub const HELP: &str = "\
commands:
  <col>            click column <col> of the bottom row
  <row> <col>      click a cell
  peek <row> <col> show what a click would remove
  reset            retry the current puzzle
  new              start a new game
  next             advance to the next level after clearing the grid
  help             show this message
  quit             leave";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    ClickColumn(Coord),
    Click(Coord2),
    Peek(Coord2),
    Reset,
    New,
    Next,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("{0:?} is not a valid coordinate")]
    BadNumber(String),
    #[error("expected {expected} coordinate(s)")]
    Arity { expected: usize },
}

fn coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::BadNumber(word.to_string()))
}

fn coords(words: &[&str]) -> Result<Coord2, CommandError> {
    match words {
        [row, col] => Ok((coord(row)?, coord(col)?)),
        _ => Err(CommandError::Arity { expected: 2 }),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&first, rest)) = words.split_first() else {
            return Err(CommandError::Empty);
        };

        let keyword = first.to_ascii_lowercase();
        let no_args = |command: Command| {
            if rest.is_empty() {
                Ok(command)
            } else {
                Err(CommandError::Arity { expected: 0 })
            }
        };
        match keyword.as_str() {
            "peek" | "p" => Ok(Self::Peek(coords(rest)?)),
            "reset" | "retry" | "r" => no_args(Self::Reset),
            "new" | "n" => no_args(Self::New),
            "next" => no_args(Self::Next),
            "help" | "h" | "?" => no_args(Self::Help),
            "quit" | "exit" | "q" => no_args(Self::Quit),
            _ if first.starts_with(|c: char| c.is_ascii_digit()) => match rest {
                [] => Ok(Self::ClickColumn(coord(first)?)),
                [col] => Ok(Self::Click((coord(first)?, coord(col)?))),
                _ => Err(CommandError::Arity { expected: 2 }),
            },
            _ => Err(CommandError::Unknown(first.to_string())),
        }
    }
}
