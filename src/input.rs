use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::Result;
use crate::game::{Command, Status};
use crate::position::Direction::{self, *};

pub trait InputSource {
    /// Waits up to `timeout` for one input event and returns the commands it
    /// maps to under `status`, or `None` if nothing arrived in time.
    fn poll_commands(&mut self, timeout: Duration, status: Status) -> Result<Option<Vec<Command>>>;
}

/// Translates one key press. A single key can yield several commands: any key
/// starts a fresh game, and `p` then pauses it straight away.
pub fn commands_for_key(ev: &KeyEvent, status: Status) -> Vec<Command> {
    if ev.kind != KeyEventKind::Press {
        return vec![];
    }

    if is_quit(ev) {
        return vec![Command::Quit];
    }

    let mut commands = vec![];

    if status == Status::Running {
        if let Some(dir) = direction_for(ev.code) {
            commands.push(Command::Turn(dir));
        }
    }

    if status == Status::NotStarted {
        commands.push(Command::Start);
    }

    if status == Status::GameOver && ev.code == KeyCode::Enter {
        commands.push(Command::Reset);
    }

    if matches!(ev.code, KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc) {
        commands.push(Command::TogglePause);
    }

    commands
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Right),
        _ => None,
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    match ev.code {
        KeyCode::Char('c') => ev.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => true,
        _ => false,
    }
}
