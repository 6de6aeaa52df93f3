//! A simplified ludo style token race.
//!
//! Each player has one token. A token enters the path on a six, then moves
//! forward by each roll, wrapping around the path. A six grants another turn.
//! There is no win condition, captures or exact-roll finish: the race goes
//! round forever.
//!
//! The engine never rolls dice itself, rolls come in through
//! [TurnBasedTokenEngine::apply_roll] so play is deterministic. [Die] is provided
//! for callers that want a fair die.

pub mod path;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::EngineError;
use crate::types::{Cell, OverDeterminableGame, PlayerId, TurnDeterminableGame};
pub use path::TokenPath;

/// the roll that enters a token and grants another turn
pub const ENTRY_ROLL: u8 = 6;

/// Result of a valid roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// the token entered the path at index 0
    Entered,
    /// the token is still waiting to enter
    MustRollSixToEnter,
    /// the token moved along the path
    Advanced {
        #[allow(missing_docs)]
        from: usize,
        #[allow(missing_docs)]
        to: usize,
    },
}

/// Read only snapshot of a [TurnBasedTokenEngine]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    /// path index per player in turn order, None while not entered
    pub positions: Vec<(PlayerId, Option<usize>)>,
    #[allow(missing_docs)]
    pub active_player: PlayerId,
    #[allow(missing_docs)]
    pub last_roll: Option<u8>,
}

/// A fair six sided die
#[derive(Debug, Clone, Copy, Default)]
pub struct Die;

impl Die {
    /// roll once, in `1..=6`
    pub fn roll(rng: &mut impl Rng) -> u8 {
        rng.sample(Die)
    }
}

impl Distribution<u8> for Die {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        Uniform::new_inclusive(1u8, 6).sample(rng)
    }
}

/// The token race state machine
#[derive(Debug, Clone)]
pub struct TurnBasedTokenEngine {
    players: Vec<PlayerId>,
    path: TokenPath,
    positions: Vec<Option<usize>>,
    active: usize,
    last_roll: Option<u8>,
    rolls: u64,
}

impl TurnBasedTokenEngine {
    /// Create a race with the given turn order. Every player starts off the path.
    pub fn new(players: Vec<PlayerId>, path: TokenPath) -> Result<Self, EngineError> {
        if players.is_empty() {
            return Err(EngineError::InvalidInput("at least one player is required".to_string()));
        }
        for (i, p) in players.iter().enumerate() {
            if players[i + 1..].contains(p) {
                return Err(EngineError::InvalidInput(format!("{} is listed twice", p)));
            }
        }

        Ok(TurnBasedTokenEngine {
            positions: vec![None; players.len()],
            players,
            path,
            active: 0,
            last_roll: None,
            rolls: 0,
        })
    }

    /// a race between `PlayerId(0)` up to `PlayerId(count - 1)`, in that order
    pub fn with_player_count(count: u8, path: TokenPath) -> Result<Self, EngineError> {
        TurnBasedTokenEngine::new((0..count).map(PlayerId).collect(), path)
    }

    /// Apply one die roll for the active player.
    ///
    /// Rolls outside `1..=6` are rejected without touching the state.
    #[instrument(level = "trace", skip(self), fields(player = %self.active_player()))]
    pub fn apply_roll(&mut self, roll: u8) -> Result<RollOutcome, EngineError> {
        if !(1..=6).contains(&roll) {
            return Err(EngineError::InvalidInput(format!(
                "roll {} is outside 1..=6",
                roll
            )));
        }

        let player = self.players[self.active];
        let outcome = match self.positions[self.active] {
            None if roll == ENTRY_ROLL => {
                self.positions[self.active] = Some(0);
                debug!(%player, "token entered");
                RollOutcome::Entered
            }
            None => RollOutcome::MustRollSixToEnter,
            Some(from) => {
                let to = self.path.advance(from, roll as usize);
                self.positions[self.active] = Some(to);
                RollOutcome::Advanced { from, to }
            }
        };

        if roll != ENTRY_ROLL {
            self.active = (self.active + 1) % self.players.len();
            debug!(from = %player, to = %self.players[self.active], "turn passes");
        }
        self.last_roll = Some(roll);
        self.rolls += 1;

        Ok(outcome)
    }

    /// snapshot of every token, whose turn it is and the last roll
    pub fn current_state(&self) -> TokenState {
        TokenState {
            positions: self
                .players
                .iter()
                .copied()
                .zip(self.positions.iter().copied())
                .collect(),
            active_player: self.active_player(),
            last_roll: self.last_roll,
        }
    }

    #[allow(missing_docs)]
    pub fn active_player(&self) -> PlayerId {
        self.players[self.active]
    }

    #[allow(missing_docs)]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// players in turn order
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    #[allow(missing_docs)]
    pub fn path(&self) -> &TokenPath {
        &self.path
    }

    /// path index of the player's token. None when the token has not entered or the
    /// player is not in this race.
    pub fn position_of(&self, player: PlayerId) -> Option<usize> {
        let idx = self.players.iter().position(|p| *p == player)?;
        self.positions[idx]
    }

    /// board cell of the player's token, if it has entered
    pub fn cell_of(&self, player: PlayerId) -> Option<Cell> {
        self.position_of(player).map(|i| self.path.cell(i))
    }
}

impl OverDeterminableGame for TurnBasedTokenEngine {
    fn is_over(&self) -> bool {
        false
    }
}

impl TurnDeterminableGame for TurnBasedTokenEngine {
    fn turn(&self) -> u64 {
        self.rolls
    }
}
