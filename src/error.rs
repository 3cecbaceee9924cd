use thiserror::Error;

use crate::TermInt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal is {cols}x{rows}, the game needs at least {min_cols}x{min_rows}")]
    TerminalTooSmall {
        cols: TermInt,
        rows: TermInt,
        min_cols: TermInt,
        min_rows: TermInt,
    },

    #[error("could not install the logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
