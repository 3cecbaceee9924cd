use rand::Rng;

use crate::{Coords, Result, TermInt};
use crate::board::HEADER_ROWS;
use crate::game::{Game, Status};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

pub trait Renderer {
    /// Draws the current state. Must not (and cannot) change it.
    fn render<R: Rng>(&mut self, game: &Game<R>) -> Result<()>;
}

/// A full screen of characters, composed from a game before being written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    cols: TermInt,
    rows: TermInt,
    cells: Vec<char>,
}

impl Frame {
    pub fn new(cols: TermInt, rows: TermInt) -> Self {
        Frame { cols, rows, cells: vec![' '; cols as usize * rows as usize] }
    }

    pub fn compose<R: Rng>(game: &Game<R>) -> Self {
        let board = game.board();
        let mut frame = Frame::new(board.cols(), board.rows());
        frame.draw_borders();

        if game.status() == Status::NotStarted {
            frame.show_message(&[
                "SNAKE GAME",
                "",
                "Press any key to begin",
                "",
                "Arrow keys or WASD to move",
                "P or Esc to pause, Q to quit",
            ]);
            return frame;
        }

        frame.draw_header(game);

        if let Some(food) = game.food().and_then(|f| board.cell(f)) {
            let inside = frame.clamp_inside(food);
            frame.put(inside, FOOD_CHAR);
        }

        let snake = game.snake();
        let dead = game.status() == Status::GameOver;
        let body_char = if dead { DEAD_SNAKE_CHAR } else { SNAKE_BODY_CHAR };

        for pos in snake.tail().filter_map(|&s| board.cell(s)) {
            frame.put(pos, body_char);
        }

        // Head last so it stays visible on top of whatever it ran into
        if let Some(head) = board.cell(snake.head()) {
            frame.put(head, if dead { DEAD_SNAKE_CHAR } else { snake.head_char() });
        }

        if dead {
            let score = format!("Score: {:02}", game.score());
            frame.show_message(&["GAME OVER", score.as_str(), "", "Press enter to start again", "or Q to quit"]);
        }

        frame
    }

    pub fn cols(&self) -> TermInt {
        self.cols
    }

    pub fn rows(&self) -> TermInt {
        self.rows
    }

    pub fn get(&self, pos: Coords) -> Option<char> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn line(&self, row: TermInt) -> String {
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize].iter().collect()
    }

    pub fn put(&mut self, pos: Coords, ch: char) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = ch;
        }
    }

    pub fn text(&mut self, pos: Coords, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put((pos.0 + i as TermInt, pos.1), ch);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Coords) -> Option<usize> {
        if pos.0 < self.cols && pos.1 < self.rows {
            Some(pos.1 as usize * self.cols as usize + pos.0 as usize)
        } else {
            None
        }
    }

    fn draw_borders(&mut self) {
        let top = HEADER_ROWS;
        let (end_x, end_y) = (self.cols - 1, self.rows - 1);

        for x in 0..self.cols {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.put((x, top), ch);
            self.put((x, end_y), ch);
        }

        for y in top + 1..end_y {
            self.put((0, y), '|');
            self.put((end_x, y), '|');
        }
    }

    fn draw_header<R: Rng>(&mut self, game: &Game<R>) {
        let score = format!("SCORE: {:02}", game.score());
        let best = format!("BEST: {:02}", game.best());

        self.text((0, 0), &score);
        self.text((self.cols.saturating_sub(best.chars().count() as TermInt), 0), &best);

        if game.status() == Status::Paused {
            let paused = "Paused";
            self.text((self.cols / 2 - paused.len() as TermInt / 2, 0), paused);
        }
    }

    fn clamp_inside(&self, pos: Coords) -> Coords {
        let x = pos.0.clamp(1, self.cols - 2);
        let y = pos.1.clamp(HEADER_ROWS + 1, self.rows - 2);
        (x, y)
    }

    fn show_message(&mut self, lines: &[&str]) {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.cols / 2, self.rows / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.put((top_left.0 + x_diff, y), ' ');
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            self.text((top_left.0, y), &padded_line);
        }
    }
}
