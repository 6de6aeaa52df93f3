//! Driving engines from the outside.
//!
//! The engines have no notion of time. [Ticker] decides when a snake step is due
//! at a fixed interval, and [play_until_over] runs a snake game to completion with
//! a heading policy, reporting each step to an [EngineInstruments].

use std::time::{Duration, Instant};
use tracing::{debug, instrument};

use crate::error::EngineError;
use crate::grid_snake::{CollisionKind, Difficulty, GridSnakeEngine, StepOutcome};
use crate::types::{Direction, EngineInstruments};

/// Fixed interval tick gate. A tick is due once strictly more than `interval`
/// has passed since the last accepted tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    last_update: Instant,
}

impl Ticker {
    /// start counting from `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Ticker {
            interval,
            last_update: now,
        }
    }

    /// a ticker running at the pace of the given difficulty
    pub fn for_difficulty(difficulty: Difficulty, now: Instant) -> Self {
        Ticker::new(difficulty.tick_interval(), now)
    }

    #[allow(missing_docs)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[allow(missing_docs)]
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_update) > self.interval
    }

    /// Record a tick at `now` if one is due. Returns whether it was.
    pub fn try_tick(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.last_update = now;
            true
        } else {
            false
        }
    }

    /// forget past ticks, as when a game is restarted
    pub fn reset(&mut self, now: Instant) {
        self.last_update = now;
    }
}

/// How a playout stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayoutEnd {
    #[allow(missing_docs)]
    Collision(CollisionKind),
    /// the snake filled the board
    BoardFull,
    /// the step budget ran out with the snake still alive
    StepLimit,
}

/// Summary of a finished playout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playout {
    /// successful moves made
    pub steps: u64,
    #[allow(missing_docs)]
    pub score: u32,
    #[allow(missing_docs)]
    pub end: PlayoutEnd,
}

/// Step `engine` with headings from `policy` until the game ends or `max_steps`
/// moves have been made. Fails with [EngineError::IllegalState] if the engine is
/// already over.
#[instrument(level = "debug", skip_all, fields(max_steps = max_steps))]
pub fn play_until_over<I, F>(
    engine: &mut GridSnakeEngine,
    mut policy: F,
    max_steps: u64,
    instruments: &I,
) -> Result<Playout, EngineError>
where
    I: EngineInstruments,
    F: FnMut(&GridSnakeEngine) -> Option<Direction>,
{
    if !engine.is_alive() {
        return Err(EngineError::IllegalState("playout started after game over"));
    }

    let mut steps = 0;
    let end = loop {
        if steps >= max_steps {
            break PlayoutEnd::StepLimit;
        }

        let heading = policy(engine);
        let start = Instant::now();
        let result = engine.step(heading);
        instruments.observe_step(start.elapsed());

        match result {
            Ok(StepOutcome::Moved { .. }) => steps += 1,
            Ok(StepOutcome::GameOver { collision, .. }) => break PlayoutEnd::Collision(collision),
            Err(EngineError::BoardFull) => {
                steps += 1;
                break PlayoutEnd::BoardFull;
            }
            Err(e) => return Err(e),
        }
    };

    let playout = Playout {
        steps,
        score: engine.score(),
        end,
    };
    debug!(?playout, "playout finished");
    Ok(playout)
}
