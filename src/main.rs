use anyhow::Context;
use clap::Parser;
use log::info;

use snake::board::Board;
use snake::config::{self, Options};
use snake::driver::Driver;
use snake::game::Game;
use snake::term::TermManager;

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    config::init_logging(&options)
        .with_context(|| format!("setting up logging to {}", options.log_file.display()))?;

    let mut term = TermManager::new().context("reading the terminal size")?;
    let (cols, rows) = term.get_terminal_size();
    let board = Board::fit(cols, rows)?;
    info!("Starting on a {}x{} board ({}x{} terminal)", board.width(), board.height(), cols, rows);

    let game = match options.seed {
        Some(seed) => Game::seeded(board, seed),
        None => Game::new(board),
    };

    term.setup().context("preparing the terminal")?;

    // The terminal is restored when the driver (and its TermManager) is dropped
    let mut driver = Driver::new(term, game);
    driver.run()?;

    Ok(())
}
