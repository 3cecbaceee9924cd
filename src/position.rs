use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn axis(self) -> Axis {
        match self {
            Left | Right => Axis::Horizontal,
            Up | Down => Axis::Vertical,
        }
    }
}

/// A point on the board, in board units (the snake moves `STEP` units per tick).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Offsets the position by `step` along `direction`. Bounds are the caller's business.
    pub fn moved(self, direction: Direction, step: i32) -> Self {
        match direction {
            Up => Position::new(self.x, self.y - step),
            Down => Position::new(self.x, self.y + step),
            Left => Position::new(self.x - step, self.y),
            Right => Position::new(self.x + step, self.y),
        }
    }

    /// Chebyshev "close enough" test: both axis deltas within `tolerance`, inclusive.
    pub fn intersects(&self, other: &Position, tolerance: i32) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();

        self == other || (dx <= tolerance && dy <= tolerance)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}
