use std::cmp::max;

use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::board::Board;
use crate::position::{Direction, Position};
use crate::snake::Snake;

/// Per-axis distance at which the head picks food up.
pub const PICKUP_TOLERANCE: i32 = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Start,
    Reset,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

pub struct Game<R = StdRng> {
    board: Board,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    best: u32,
    status: Status,
    rng: R,
}

impl Game<StdRng> {
    pub fn new(board: Board) -> Self {
        Game::with_rng(board, StdRng::from_entropy())
    }

    pub fn seeded(board: Board, seed: u64) -> Self {
        Game::with_rng(board, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(board: Board, rng: R) -> Self {
        Game {
            board,
            snake: Snake::new(board.centre()),
            food: None,
            score: 0,
            best: 0,
            status: Status::NotStarted,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn apply(&mut self, command: Command) {
        match (command, self.status) {
            (Command::Turn(dir), Status::Running) => self.snake.turn(dir),
            (Command::Start, Status::NotStarted) => self.set_status(Status::Running),
            (Command::Reset, Status::GameOver) => self.reset(),
            (Command::TogglePause, Status::Running) => self.set_status(Status::Paused),
            (Command::TogglePause, Status::Paused) => self.set_status(Status::Running),
            _ => trace!("Ignoring {:?} while {:?}", command, self.status),
        }
    }

    /// One tick. Does nothing unless the game is running.
    pub fn update(&mut self) {
        if self.status != Status::Running {
            return;
        }

        self.snake.advance();
        let head = self.snake.head();
        trace!("Head at {:?}", head);

        if let Some(food) = self.food {
            if head.intersects(&food, PICKUP_TOLERANCE) {
                self.snake.grow();
                self.food = None;
                self.score += 1;
                debug!("Ate food at {:?}, score {}", food, self.score);
            }
        }

        if self.food.is_none() {
            self.spawn_food();
        }

        if let Some(cause) = self.collision() {
            info!("Snake hit the {:?} at {:?}", cause, head);
            self.set_status(Status::GameOver);
        }
    }

    pub fn collision(&self) -> Option<Collision> {
        let head = self.snake.head();

        if self.board.is_outside(head) {
            Some(Collision::Wall)
        } else if self.snake.bites_itself() {
            Some(Collision::Body)
        } else {
            None
        }
    }

    #[doc(hidden)]
    pub fn debug_set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[doc(hidden)]
    pub fn debug_set_food(&mut self, food: Option<Position>) {
        self.food = food;
    }

    #[doc(hidden)]
    pub fn debug_set_score(&mut self, score: u32) {
        self.score = score;
    }

    ///////////////////////////////////////////////////////////////////////////

    fn reset(&mut self) {
        self.score = 0;
        self.food = None;
        self.snake = Snake::new(self.board.centre());
        self.set_status(Status::Running);
    }

    fn set_status(&mut self, status: Status) {
        if status == Status::GameOver {
            self.best = max(self.best, self.score);
            info!("Game over, score {} best {}", self.score, self.best);
        }

        info!("Status {:?} -> {:?}", self.status, status);
        self.status = status;
    }

    // Food may land under the body; pickup only checks the head
    fn spawn_food(&mut self) {
        let food = self.board.random_interior(&mut self.rng);
        debug!("Spawned food at {:?}", food);
        self.food = Some(food);
    }
}
