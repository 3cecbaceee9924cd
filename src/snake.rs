use std::collections::VecDeque;

use crate::position::{Direction::{self, *}, Position};

/// Distance the head travels on every move.
pub const STEP: i32 = 10;

/// Where parked and freshly grown segments sit until real positions shift into them.
pub const OFF_BOARD: Position = Position::new(-10, -10);

const INITIAL_TAIL_LENGTH: usize = 3;

#[derive(Clone, Debug)]
pub struct Snake {
    head: Position,
    direction: Direction,
    // Nearest to the head first
    tail: VecDeque<Position>,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake::from_parts(head, Right, vec![OFF_BOARD; INITIAL_TAIL_LENGTH])
    }

    pub fn from_parts<I>(head: Position, direction: Direction, tail: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        Snake { head, direction, tail: tail.into_iter().collect() }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn tail(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.tail.iter()
    }

    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    /// Shifts every segment into its predecessor's spot, then steps the head.
    ///
    /// The deque rotates instead of copying: the old head becomes segment 0
    /// and the last segment falls off, which leaves segment `i` holding the
    /// old segment `i - 1`.
    pub fn advance(&mut self) {
        if !self.tail.is_empty() {
            self.tail.push_front(self.head);
            self.tail.pop_back();
        }

        self.head = self.head.moved(self.direction, STEP);
    }

    /// Turns only onto the other axis. Anything else is dropped, not queued.
    pub fn turn(&mut self, new_direction: Direction) {
        if new_direction.axis() != self.direction.axis() {
            self.direction = new_direction;
        }
    }

    pub fn grow(&mut self) {
        self.tail.push_back(OFF_BOARD);
    }

    pub fn bites_itself(&self) -> bool {
        self.tail.contains(&self.head)
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
