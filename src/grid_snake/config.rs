//! Configuration for a snake game
//!
//! Every field has a default, so a config file only needs to name what it changes.
//! The defaults reproduce the classic start: a 20x20 board with a three cell snake
//! in the middle heading left.

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::time::Duration;

use crate::error::EngineError;
use crate::types::{grid_extent, Cell, Direction};

/// How fast the external driver should tick the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[allow(missing_docs)]
    Easy,
    #[allow(missing_docs)]
    Medium,
    #[allow(missing_docs)]
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    /// the interval between ticks for this difficulty
    pub fn tick_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(300),
            Difficulty::Medium => Duration::from_millis(150),
            Difficulty::Hard => Duration::from_millis(80),
        }
    }
}

/// Configuration for a [super::GridSnakeEngine]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// side length of the square board
    pub grid_size: u32,
    /// starting body, head first
    pub initial_body: Vec<Cell>,
    #[allow(missing_docs)]
    pub initial_heading: Direction,
    #[allow(missing_docs)]
    pub difficulty: Difficulty,
    /// seed for food placement, entropy when unset
    pub seed: Option<u64>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        SnakeConfig {
            grid_size: 20,
            initial_body: vec![Cell::new(10, 10), Cell::new(10, 11), Cell::new(10, 12)],
            initial_heading: Direction::Left,
            difficulty: Difficulty::default(),
            seed: None,
        }
    }
}

impl SnakeConfig {
    /// a default config on a board of the given size, with a single cell snake in the middle
    pub fn with_grid_size(grid_size: u32) -> Self {
        // half of any u32 fits in an i32
        let mid = i32::try_from(grid_size / 2).unwrap_or(i32::MAX);
        SnakeConfig {
            grid_size,
            initial_body: vec![Cell::new(mid, mid)],
            ..Default::default()
        }
    }

    #[allow(missing_docs)]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the starting position is playable: a non-empty board, and a
    /// non-empty body of distinct in-bounds cells where each segment touches the
    /// next.
    pub fn validate(&self) -> Result<(), EngineError> {
        validate_body(self.grid_size, &self.initial_body)
    }
}

pub(crate) fn validate_body(grid_size: u32, body: &[Cell]) -> Result<(), EngineError> {
    if grid_size == 0 {
        return Err(EngineError::InvalidInput("grid size must be at least 1".to_string()));
    }
    grid_extent(grid_size)?;
    if body.is_empty() {
        return Err(EngineError::InvalidInput("snake body is empty".to_string()));
    }
    if let Some(c) = body.iter().find(|c| !c.in_bounds(grid_size)) {
        return Err(EngineError::InvalidInput(format!(
            "body cell {} is outside a {}x{} board",
            c, grid_size, grid_size
        )));
    }
    for (i, c) in body.iter().enumerate() {
        if body[i + 1..].contains(c) {
            return Err(EngineError::InvalidInput(format!(
                "body cell {} appears more than once",
                c
            )));
        }
    }
    if let Some(w) = body.windows(2).find(|w| !w[0].is_adjacent(&w[1])) {
        return Err(EngineError::InvalidInput(format!(
            "body cells {} and {} are not adjacent",
            w[0], w[1]
        )));
    }
    Ok(())
}
