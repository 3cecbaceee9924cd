use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use rand::rngs::StdRng;

use snake::board::Board;
use snake::driver::{Clock, Driver, TICK};
use snake::game::{Command, Game, Status};
use snake::input::{commands_for_key, InputSource};
use snake::position::{Direction::*, Position};
use snake::render::{Frame, Renderer};
use snake::snake::Snake;
use snake::Result;

/// Time that only moves when a test (or the scripted terminal) says so.
#[derive(Clone)]
struct FakeClock(Rc<Cell<Instant>>);

impl FakeClock {
    fn new() -> Self {
        FakeClock(Rc::new(Cell::new(Instant::now())))
    }

    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

/// Replays one batch of keys per driver step, one key per poll, and keeps
/// every rendered frame. A batch can be delayed to stand in for a blocking read.
struct ScriptedTerm {
    clock: FakeClock,
    script: VecDeque<(Duration, Vec<KeyEvent>)>,
    pending: Option<VecDeque<KeyEvent>>,
    timeouts: Vec<Duration>,
    statuses: Vec<Status>,
    frames: Vec<Frame>,
}

impl ScriptedTerm {
    fn new(clock: FakeClock, batches: Vec<Vec<KeyEvent>>) -> Self {
        let script = batches.into_iter().map(|keys| (Duration::ZERO, keys)).collect();
        ScriptedTerm { clock, script, pending: None, timeouts: vec![], statuses: vec![], frames: vec![] }
    }

    fn delayed(clock: FakeClock, batches: Vec<(Duration, Vec<KeyEvent>)>) -> Self {
        let mut term = ScriptedTerm::new(clock, vec![]);
        term.script = batches.into();
        term
    }
}

impl InputSource for ScriptedTerm {
    fn poll_commands(&mut self, timeout: Duration, status: Status) -> Result<Option<Vec<Command>>> {
        if self.pending.is_none() {
            self.timeouts.push(timeout);
            let (delay, keys) = self.script.pop_front().unwrap_or_default();
            self.clock.advance(delay);
            self.pending = Some(keys.into());
        }

        match self.pending.as_mut().and_then(|keys| keys.pop_front()) {
            Some(key) => {
                self.statuses.push(status);
                Ok(Some(commands_for_key(&key, status)))
            }
            None => {
                self.pending = None;
                Ok(None)
            }
        }
    }
}

impl Renderer for ScriptedTerm {
    fn render<R: Rng>(&mut self, game: &Game<R>) -> Result<()> {
        self.frames.push(Frame::compose(game));
        Ok(())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn any_key() -> KeyEvent {
    key(KeyCode::Char(' '))
}

fn pause_key() -> KeyEvent {
    key(KeyCode::Char('p'))
}

fn driver(batches: Vec<Vec<KeyEvent>>) -> (Driver<ScriptedTerm, StdRng, FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    let term = ScriptedTerm::new(clock.clone(), batches);
    let game = Game::seeded(Board::REFERENCE, 5);
    (Driver::with_clock(term, game, clock.clone()), clock)
}

#[test]
fn start_ticks_straight_away() {
    let (mut driver, _) = driver(vec![vec![any_key()]]);

    assert!(driver.step().unwrap());

    assert_eq!(driver.game().status(), Status::Running);
    assert_eq!(driver.game().snake().head(), Position::new(390, 260));
    assert!(driver.ticker().is_running());
    assert_eq!(driver.io().frames.len(), 1);
}

#[test]
fn ticks_follow_the_period() {
    let (mut driver, clock) = driver(vec![vec![any_key()]]);
    driver.step().unwrap();

    clock.advance(TICK / 5);
    driver.step().unwrap();
    assert_eq!(driver.game().snake().head(), Position::new(390, 260));

    clock.advance(TICK - TICK / 5);
    driver.step().unwrap();
    assert_eq!(driver.game().snake().head(), Position::new(400, 260));

    // Blocks on input only until the next tick is due
    assert_eq!(driver.io().timeouts[1], TICK - TICK / 5);
}

#[test]
fn a_slow_start_key_still_ticks_once() {
    let clock = FakeClock::new();
    let term = ScriptedTerm::delayed(clock.clone(), vec![(Duration::from_millis(200), vec![any_key()])]);
    let mut driver = Driver::with_clock(term, Game::seeded(Board::REFERENCE, 5), clock.clone());

    driver.step().unwrap();
    assert_eq!(driver.game().snake().head(), Position::new(390, 260));

    driver.step().unwrap();
    assert_eq!(driver.game().snake().head(), Position::new(390, 260));
    assert_eq!(driver.ticker().time_until_due(clock.now()), Some(TICK));
}

#[test]
fn a_slow_resume_key_still_ticks_once() {
    let clock = FakeClock::new();
    let term = ScriptedTerm::delayed(
        clock.clone(),
        vec![
            (Duration::ZERO, vec![any_key()]),
            (Duration::ZERO, vec![pause_key()]),
            (Duration::from_millis(240), vec![pause_key()]),
            (Duration::ZERO, vec![]),
        ],
    );
    let mut driver = Driver::with_clock(term, Game::seeded(Board::REFERENCE, 5), clock);

    for _ in 0..4 {
        driver.step().unwrap();
    }

    assert_eq!(driver.game().status(), Status::Running);
    assert_eq!(driver.game().snake().head(), Position::new(400, 260));
}

#[test]
fn idle_steps_do_not_redraw() {
    let (mut driver, clock) = driver(vec![]);

    driver.step().unwrap();
    clock.advance(TICK * 4);
    driver.step().unwrap();

    assert_eq!(driver.game().status(), Status::NotStarted);
    assert!(driver.io().frames.is_empty());
    assert!(driver.io().timeouts.iter().all(|&t| t > TICK));
}

#[test]
fn pause_stops_and_resume_restarts_the_ticker() {
    let (mut driver, clock) = driver(vec![vec![any_key()], vec![pause_key()]]);
    driver.step().unwrap();
    clock.advance(Duration::from_millis(10));
    driver.step().unwrap();

    assert_eq!(driver.game().status(), Status::Paused);
    assert!(!driver.ticker().is_running());

    let head = driver.game().snake().head();
    clock.advance(TICK * 10);
    driver.step().unwrap();
    assert_eq!(driver.game().snake().head(), head);
}

#[test]
fn resume_ticks_at_once() {
    let (mut driver, clock) = driver(vec![vec![any_key()], vec![pause_key()], vec![pause_key()]]);
    driver.step().unwrap();
    clock.advance(Duration::from_millis(10));
    driver.step().unwrap();
    clock.advance(Duration::from_millis(10));
    driver.step().unwrap();

    assert_eq!(driver.game().status(), Status::Running);
    assert_eq!(driver.game().snake().head(), Position::new(400, 260));
}

#[test]
fn game_over_stops_the_ticker_until_reset() {
    let clock = FakeClock::new();
    let mut game = Game::seeded(Board::REFERENCE, 5);
    game.debug_set_snake(Snake::from_parts(Position::new(30, 100), Left, vec![]));
    let term = ScriptedTerm::new(clock.clone(), vec![vec![any_key()], vec![], vec![key(KeyCode::Enter)]]);
    let mut driver = Driver::with_clock(term, game, clock.clone());

    driver.step().unwrap();
    assert_eq!(driver.game().status(), Status::GameOver);
    assert!(!driver.ticker().is_running());

    clock.advance(TICK);
    driver.step().unwrap();
    assert_eq!(driver.game().status(), Status::GameOver);

    clock.advance(TICK);
    driver.step().unwrap();
    assert_eq!(driver.game().status(), Status::Running);
    assert!(driver.ticker().is_running());
    assert_eq!(driver.game().snake().head(), driver.game().board().centre().moved(Right, 10));
}

#[test]
fn keys_in_one_batch_see_the_status_left_by_the_previous_key() {
    let clock = FakeClock::new();
    let mut game = Game::seeded(Board::REFERENCE, 5);
    game.debug_set_snake(Snake::from_parts(Position::new(30, 100), Left, vec![]));
    let term = ScriptedTerm::new(
        clock.clone(),
        vec![vec![any_key()], vec![key(KeyCode::Enter), key(KeyCode::Up)]],
    );
    let mut driver = Driver::with_clock(term, game, clock.clone());

    driver.step().unwrap();
    assert_eq!(driver.game().status(), Status::GameOver);

    clock.advance(TICK);
    driver.step().unwrap();

    assert_eq!(driver.io().statuses, vec![Status::NotStarted, Status::GameOver, Status::Running]);
    assert_eq!(driver.game().snake().direction(), Up);
    assert_eq!(driver.game().snake().head(), driver.game().board().centre().moved(Up, 10));
}

#[test]
fn quit_ends_the_loop() {
    let (mut driver, clock) = driver(vec![vec![any_key()], vec![key(KeyCode::Char('q'))]]);

    assert!(driver.step().unwrap());
    clock.advance(TICK);
    assert!(!driver.step().unwrap());
}

#[test]
fn run_renders_the_title_first() {
    let (mut driver, _) = driver(vec![vec![key(KeyCode::Char('q'))]]);
    driver.run().unwrap();

    let term = driver.into_io();
    assert_eq!(term.frames.len(), 1);
    assert!((0..term.frames[0].rows()).any(|r| term.frames[0].line(r).contains("SNAKE GAME")));
}
