use crate::{Coords, Result, TermInt};
use crate::game::{Command, Game, Status};
use crate::input::{commands_for_key, InputSource};
use crate::render::{Frame, Renderer};
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, poll, read};
use log::{debug, warn};
use rand::Rng;

/// The crossterm front end: raw-mode alternate screen, key input, and a
/// frame buffer so each render only writes the cells that changed.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    // What is on screen right now; `None` forces a full redraw
    screen: Option<Frame>,
    active: bool,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout(), screen: None, active: false })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;

        // Every step is attempted even if an earlier one failed
        first_error([
            terminal::disable_raw_mode(),
            execute!(self.stdout, cursor::Show, cursor::EnableBlinking),
            execute!(self.stdout, LeaveAlternateScreen),
        ])?;
        Ok(())
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = None;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    // Top-left corner that centres a frame in the terminal
    fn origin(&self, frame: &Frame) -> Coords {
        (self.width.saturating_sub(frame.cols()) / 2, self.height.saturating_sub(frame.rows()) / 2)
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn draw(&mut self, frame: Frame) -> Result<()> {
        let origin = self.origin(&frame);
        let previous = self.screen.take().filter(|s| s.cols() == frame.cols() && s.rows() == frame.rows());

        for y in 0..frame.rows() {
            for x in 0..frame.cols() {
                let ch = frame.get((x, y)).unwrap_or(' ');
                let unchanged = previous.as_ref().and_then(|p| p.get((x, y))) == Some(ch);

                if !unchanged {
                    self.print_at((origin.0 + x, origin.1 + y), ch)?;
                }
            }
        }

        self.stdout.flush()?;
        self.screen = Some(frame);
        Ok(())
    }

    fn handle_resize(&mut self, width: TermInt, height: TermInt) -> Result<()> {
        debug!("Terminal resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.clear()
    }
}

impl InputSource for TermManager {
    fn poll_commands(&mut self, timeout: Duration, status: Status) -> Result<Option<Vec<Command>>> {
        if !poll(timeout)? {
            return Ok(None);
        }

        let commands = match read()? {
            Event::Key(ev) => commands_for_key(&ev, status),
            Event::Resize(w, h) => {
                self.handle_resize(w, h)?;
                vec![]
            }
            _ => vec![],
        };

        Ok(Some(commands))
    }
}

impl Renderer for TermManager {
    fn render<R: Rng>(&mut self, game: &Game<R>) -> Result<()> {
        self.draw(Frame::compose(game))
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("Could not restore the terminal: {}", e);
        }
    }
}

fn first_error<I>(results: I) -> io::Result<()>
where
    I: IntoIterator<Item = io::Result<()>>,
{
    results.into_iter().collect()
}
