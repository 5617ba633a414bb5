//! Driving a [`Game`] through time.
//!
//! The game itself only knows logical ticks. [`FixedTimestep`] converts real
//! elapsed time into a whole number of ticks, carrying the remainder over as
//! lag, so the game advances at the same rate however irregularly frames
//! arrive. [`run`] wraps that in a wall-clock loop around a [`Frontend`];
//! [`run_headless`] skips the clock entirely.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use crate::constants::TICK_SECONDS;
use crate::game::{Game, GameState, GameStatus};
use crate::piece::Side;

/// Presentation and input side of a running game.
pub trait Frontend {
    /// Collect pending input and pass it on to the players. Called once per
    /// frame, before the game is stepped.
    fn handle_events(&mut self, game: &Game) -> Result<()>;

    /// Present the game after it was stepped. `time` is the game time plus
    /// the lag not yet consumed by a tick, in seconds.
    fn update(&mut self, state: &GameState, time: f64) -> Result<()>;
}

/// Fixed-timestep accumulator.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    lag: Duration,
    game_time: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration) -> Result<Self> {
        if step.is_zero() {
            bail!("tick length must be positive");
        }
        Ok(Self {
            step,
            lag: Duration::ZERO,
            game_time: Duration::ZERO,
        })
    }

    /// Account for `elapsed` real time and run one tick per whole step it
    /// covers. Stops early once the game is over.
    pub fn advance(&mut self, game: &mut Game, elapsed: Duration) -> Result<GameStatus> {
        self.lag += elapsed;
        while self.lag >= self.step && !game.is_over() {
            self.lag -= self.step;
            self.game_time += self.step;
            game.advance_tick(self.game_time.as_secs_f64())?;
        }
        Ok(game.status())
    }

    /// Logical time of the last tick, in seconds.
    pub fn game_time(&self) -> f64 {
        self.game_time.as_secs_f64()
    }

    /// Time to hand to the frontend: game time plus unconsumed lag.
    pub fn render_time(&self) -> f64 {
        (self.game_time + self.lag).as_secs_f64()
    }

    /// Real time left until the next tick is due.
    pub fn until_next_tick(&self) -> Duration {
        self.step.saturating_sub(self.lag)
    }
}

/// Play `game` to the end in real time and return the winner.
///
/// Time spent inside [`Frontend::handle_events`] does not advance the game, so
/// a frontend that blocks waiting for a human does not leave a backlog of
/// ticks behind.
pub fn run(game: &mut Game, frontend: &mut impl Frontend, step: Duration) -> Result<Side> {
    let mut timestep = FixedTimestep::new(step)?;
    frontend.update(game.state(), timestep.render_time())?;

    let mut prev = Instant::now();
    loop {
        if let GameStatus::Won(winner) = game.status() {
            return Ok(winner);
        }

        let before_input = Instant::now();
        frontend.handle_events(game)?;
        let elapsed = before_input - prev;
        prev = Instant::now();

        timestep.advance(game, elapsed)?;
        frontend.update(game.state(), timestep.render_time())?;

        if !game.is_over() {
            thread::sleep(timestep.until_next_tick());
        }
    }
}

/// Play `game` on logical time only, for at most `max_ticks` ticks.
///
/// Returns the winner, or `None` if the tick cap was reached first. There is
/// no draw rule, so two kings can otherwise chase each other forever.
pub fn run_headless(game: &mut Game, max_ticks: u64) -> Result<Option<Side>> {
    for tick in 1..=max_ticks {
        if let GameStatus::Won(winner) = game.advance_tick(tick as f64 * TICK_SECONDS)? {
            return Ok(Some(winner));
        }
    }
    Ok(match game.status() {
        GameStatus::Won(winner) => Some(winner),
        GameStatus::Ongoing => None,
    })
}
