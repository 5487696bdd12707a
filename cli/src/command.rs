use std::str::FromStr;

use anyhow::{Context, Result, bail};
use sweeper_core::Coord2;

pub(crate) const USAGE: &str = "commands: r <col> <row> (reveal), f <col> <row> (flag), \
c <col> <row> (chord), n [difficulty] (new game), restart, h (help), q (quit)";

/// One line of player input.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Chord(Coord2),
    NewGame(Option<String>),
    Restart,
    Help,
    Quit,
}

fn parse_coords<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let (Some(col), Some(row), None) = (args.next(), args.next(), args.next()) else {
        bail!("expected a column and a row");
    };
    let col = col.parse().with_context(|| format!("bad column {col:?}"))?;
    let row = row.parse().with_context(|| format!("bad row {row:?}"))?;
    Ok((col, row))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(words)?),
            "f" | "flag" => Self::Flag(parse_coords(words)?),
            "c" | "chord" => Self::Chord(parse_coords(words)?),
            "n" | "new" => {
                let rest: Vec<_> = words.collect();
                Self::NewGame((!rest.is_empty()).then(|| rest.join(" ")))
            }
            "restart" => Self::Restart,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {other:?}"),
        })
    }
}
