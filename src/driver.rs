use std::time::{Duration, Instant};

use log::{info, trace};
use rand::Rng;

use crate::Result;
use crate::game::{Command, Game, Status};
use crate::input::InputSource;
use crate::render::Renderer;

pub const TICK: Duration = Duration::from_millis(50);

// How long to wait for input while no tick is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Fixed-period schedule. Stopped until `start`; the first tick is due at once.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Ticker { period, next_due: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// True at most once per period. Ticks missed by more than a period are skipped.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            _ => false,
        }
    }
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// The control loop: owns the game, and schedules both updates and rendering.
pub struct Driver<T, R, C = SystemClock> {
    io: T,
    game: Game<R>,
    ticker: Ticker,
    clock: C,
}

impl<T, R> Driver<T, R, SystemClock>
where
    T: InputSource + Renderer,
    R: Rng,
{
    pub fn new(io: T, game: Game<R>) -> Self {
        Driver::with_clock(io, game, SystemClock)
    }
}

impl<T, R, C> Driver<T, R, C>
where
    T: InputSource + Renderer,
    R: Rng,
    C: Clock,
{
    pub fn with_clock(io: T, game: Game<R>, clock: C) -> Self {
        Driver { io, game, ticker: Ticker::new(TICK), clock }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn io(&self) -> &T {
        &self.io
    }

    pub fn into_io(self) -> T {
        self.io
    }

    pub fn run(&mut self) -> Result<()> {
        self.io.render(&self.game)?;

        while self.step()? {}

        info!("Quitting with best score {}", self.game.best());
        Ok(())
    }

    /// One pass of the loop: wait for input, apply it, tick if due, redraw if
    /// anything changed. Returns `false` once the player quits.
    ///
    /// Each event is mapped against the status left by the one before it, and
    /// the clock is read after every wait so the ticker never starts in the past.
    pub fn step(&mut self) -> Result<bool> {
        let mut wait = self.ticker.time_until_due(self.clock.now()).unwrap_or(IDLE_POLL);
        let mut dirty = false;

        // Block for the first event only, then drain whatever else is queued
        while let Some(commands) = self.io.poll_commands(wait, self.game.status())? {
            wait = Duration::ZERO;
            let now = self.clock.now();

            for command in commands {
                if command == Command::Quit {
                    return Ok(false);
                }

                let before = self.game.status();
                self.game.apply(command);
                self.sync_ticker(before, now);
                dirty = true;
            }
        }

        let now = self.clock.now();
        if self.ticker.poll_due(now) {
            trace!("Tick");
            let before = self.game.status();
            self.game.update();
            self.sync_ticker(before, now);
            dirty = true;
        }

        if dirty {
            self.io.render(&self.game)?;
        }

        Ok(true)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn sync_ticker(&mut self, before: Status, now: Instant) {
        let after = self.game.status();

        if after == Status::Running && before != Status::Running {
            self.ticker.start(now);
        } else if after != Status::Running {
            self.ticker.stop();
        }
    }
}
