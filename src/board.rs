use std::{cmp::min, ops::Range};

use rand::Rng;

use crate::{Coords, Error, Result, TermInt};
use crate::position::Position;
use crate::snake::STEP;

/// Rows above the board used for the score line.
pub const HEADER_ROWS: TermInt = 1;

const LOW_X: i32 = 20;
const LOW_Y: i32 = 40;

// Board sizes are multiples of this so the centre stays on the movement grid
const GRID: i32 = 2 * STEP;

// Wide enough for the widest message box (30 columns)
const MIN_WIDTH: i32 = 300;
const MIN_HEIGHT: i32 = 160;

pub const MIN_COLS: TermInt = (MIN_WIDTH / STEP) as TermInt;
pub const MIN_ROWS: TermInt = (MIN_HEIGHT / STEP) as TermInt + HEADER_ROWS;

/// Play area geometry. The bordered rectangle runs from `(low_x, low_y)` to
/// `(high_x, high_y)`; reaching either line is a wall hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    pub const REFERENCE: Board = Board::new(760, 520);

    // Only sizes from `fit` (or the reference) are guaranteed a non-empty spawn area
    pub(crate) const fn new(width: i32, height: i32) -> Self {
        Board { width, height }
    }

    /// Largest board, up to the reference size, that fits a terminal of `cols` x `rows`.
    pub fn fit(cols: TermInt, rows: TermInt) -> Result<Self> {
        let too_small = || Error::TerminalTooSmall { cols, rows, min_cols: MIN_COLS, min_rows: MIN_ROWS };

        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(too_small());
        }

        let width = min(Board::REFERENCE.width, cols as i32 * STEP) / GRID * GRID;
        let height = min(Board::REFERENCE.height, (rows - HEADER_ROWS) as i32 * STEP) / GRID * GRID;

        if width < MIN_WIDTH || height < MIN_HEIGHT {
            return Err(too_small());
        }

        Ok(Board::new(width, height))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn low_x(&self) -> i32 {
        LOW_X
    }

    pub fn high_x(&self) -> i32 {
        self.width + 10
    }

    pub fn low_y(&self) -> i32 {
        LOW_Y
    }

    pub fn high_y(&self) -> i32 {
        self.height + 30
    }

    pub fn centre(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn is_outside(&self, p: Position) -> bool {
        p.x <= self.low_x() || p.x >= self.high_x() || p.y <= self.low_y() || p.y >= self.high_y()
    }

    /// Half-open ranges food is drawn from. Both exclude the boundary lines.
    pub fn spawn_area(&self) -> (Range<i32>, Range<i32>) {
        (self.low_x() + 1..self.width - 40, self.low_y() + 1..self.height - 20)
    }

    /// Uniform over the spawn area, regardless of what is already there.
    pub fn random_interior<R: Rng>(&self, rng: &mut R) -> Position {
        let (xs, ys) = self.spawn_area();
        Position::new(rng.gen_range(xs), rng.gen_range(ys))
    }

    /// Terminal columns taken by the board, borders included.
    pub fn cols(&self) -> TermInt {
        (self.width / STEP) as TermInt
    }

    /// Terminal rows taken by the header and the board, borders included.
    pub fn rows(&self) -> TermInt {
        (self.height / STEP) as TermInt + HEADER_ROWS
    }

    /// The terminal cell a position is drawn in, or `None` outside the bordered rectangle.
    pub fn cell(&self, p: Position) -> Option<Coords> {
        if p.x < self.low_x() || p.x > self.high_x() || p.y < self.low_y() || p.y > self.high_y() {
            return None;
        }

        let col = (p.x - self.low_x()) / STEP;
        let row = (p.y - self.low_y()) / STEP;
        Some((col as TermInt, row as TermInt + HEADER_ROWS))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::REFERENCE
    }
}
