#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Game state engines for two small grid games, with no rendering or UI attached.
//!
//! - [grid_snake::GridSnakeEngine] is a single player snake on a square board. It
//!   moves one cell per [grid_snake::GridSnakeEngine::step], grows on food and dies
//!   on walls or its own body.
//! - [token_race::TurnBasedTokenEngine] is a simplified ludo race: roll a six to
//!   enter, move forward around a cyclic path, a six rolls again.
//!
//! Both are plain state machines owned by a single caller. The caller decides
//! when to step (see [driver::Ticker]) and reads [grid_snake::SnakeState] or
//! [token_race::TokenState] snapshots to draw whatever it likes.
//!
//! ```
//! use grid_arcade_engines::grid_snake::{GridSnakeEngine, StepOutcome};
//! use grid_arcade_engines::types::{Cell, Direction};
//!
//! let mut engine =
//!     GridSnakeEngine::from_parts(3, vec![Cell::new(1, 1)], Direction::Right, Cell::new(0, 0))
//!         .unwrap();
//! assert!(matches!(engine.step(None), Ok(StepOutcome::Moved { grew: false, .. })));
//! assert!(matches!(engine.step(None), Ok(StepOutcome::GameOver { score: 0, .. })));
//! ```

use grid_snake::SnakeConfig;

pub mod driver;
pub mod error;
pub mod grid_snake;
pub mod token_race;
pub mod types;

/// Loads a snake config from a JSON string
pub fn config_fixture(config_fixture: &str) -> Result<SnakeConfig, serde_json::Error> {
    serde_json::from_str(config_fixture)
}
