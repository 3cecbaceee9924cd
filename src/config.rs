use std::{fs::File, path::PathBuf};

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::Result;

/// Snake in the terminal. Arrow keys or WASD to steer, P or Esc to pause,
/// Enter to play again, Q or Ctrl+C to quit.
#[derive(Debug, Clone, Parser)]
#[command(name = "snake", version)]
pub struct Options {
    /// File the log is written to (the terminal itself is taken by the game)
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Seed for food placement, for a repeatable game
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn init_logging(options: &Options) -> Result<()> {
    let file = File::create(&options.log_file)?;
    WriteLogger::init(options.log_level, Config::default(), file)?;
    Ok(())
}
