use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sweeper_core::*;
use tracing_subscriber::filter::LevelFilter;

use command::{Command, USAGE};
use presets::PresetFile;

mod command;
mod presets;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Preset name (beginner, intermediate-2, expert, ...) or a custom `<columns>x<rows>:<mines>` board
    #[arg(short, long, default_value = "beginner")]
    difficulty: String,

    /// TOML file with custom presets
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Session state the driver keeps between input lines.
struct Session {
    engine: GameEngine,
    presets: Option<PresetFile>,
}

impl Session {
    /// Runs one command, returning a message for the player.
    fn apply(&mut self, command: Command) -> Result<Option<String>> {
        let message = match command {
            Command::Reveal(coords) => reveal_message(self.engine.reveal(coords)?),
            Command::Chord(coords) => match self.engine.chord(coords)? {
                RevealOutcome::Blocked => Some("nothing to chord there".to_string()),
                outcome => reveal_message(outcome),
            },
            Command::Flag(coords) => match self.engine.toggle_flag(coords)? {
                FlagOutcome::Refused if self.engine.flags_remaining() == 0 => {
                    Some("no flags left".to_string())
                }
                FlagOutcome::Refused => Some("cannot flag a revealed cell".to_string()),
                FlagOutcome::Flagged | FlagOutcome::Unflagged => None,
            },
            Command::NewGame(name) => {
                let config = match name {
                    Some(name) => presets::resolve(&name, self.presets.as_ref())?.config(),
                    None => *self.engine.config(),
                };
                self.engine.new_game(config);
                None
            }
            Command::Restart => {
                self.engine.restart();
                None
            }
            Command::Help => {
                let custom = self
                    .presets
                    .iter()
                    .flat_map(|file| file.names())
                    .collect::<Vec<_>>();
                let builtin = Difficulty::PRESETS.map(Difficulty::name).join(", ");
                Some(if custom.is_empty() {
                    format!("{USAGE}\npresets: {builtin}")
                } else {
                    format!("{USAGE}\npresets: {builtin}\ncustom: {}", custom.join(", "))
                })
            }
            Command::Quit => None,
        };
        Ok(message)
    }
}

fn reveal_message(outcome: RevealOutcome) -> Option<String> {
    match outcome {
        RevealOutcome::Blocked => Some("nothing to reveal there".to_string()),
        RevealOutcome::Continue => None,
        RevealOutcome::Lost((col, row)) => Some(format!("stepped on a mine at {col} {row}")),
        RevealOutcome::Won => Some("all safe cells cleared".to_string()),
    }
}

fn run(args: Args) -> Result<()> {
    let presets = args.config.as_deref().map(PresetFile::load).transpose()?;
    let difficulty = presets::resolve(&args.difficulty, presets.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Starting {} with seed {}", difficulty, seed);

    let mut session = Session {
        engine: GameEngine::new(difficulty.config(), seed),
        presets,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}\n{}", USAGE, render::render(&session.engine))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err:#}\n{USAGE}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        log::debug!("Command: {:?}", command);
        match session.apply(command) {
            Ok(Some(message)) => writeln!(stdout, "{message}")?,
            Ok(None) => {}
            Err(err) => writeln!(stdout, "{err:#}")?,
        }
        writeln!(stdout, "{}", render::render(&session.engine))?;
    }

    log::info!("Bye");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);
    run(args)
}
