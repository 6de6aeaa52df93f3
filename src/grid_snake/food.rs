//! Food placement on the free cells of the board
use fxhash::FxHashSet;
use itertools::iproduct;
use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::{instrument, warn};

use crate::error::EngineError;
use crate::types::{grid_extent, Cell};

/// iterate every cell of a `size x size` board not contained in `excluding`, row major
pub fn free_cells<'a>(
    size: u32,
    excluding: &'a FxHashSet<Cell>,
) -> Result<impl Iterator<Item = Cell> + 'a, EngineError> {
    let size = grid_extent(size)?;
    Ok(iproduct!(0..size, 0..size)
        .map(|(row, col)| Cell::new(row, col))
        .filter(move |c| !excluding.contains(c)))
}

/// Picks a uniformly random cell on the board that is not in `excluding`.
///
/// The free cells are enumerated rather than sampled until a hit, so this
/// terminates on a nearly full board and reports [EngineError::BoardFull]
/// when nothing is left. Boards too wide for [Cell] are
/// [EngineError::InvalidInput].
#[instrument(level = "trace", skip_all, fields(size = size, excluded = excluding.len()))]
pub fn place_food(
    size: u32,
    excluding: &FxHashSet<Cell>,
    rng: &mut impl Rng,
) -> Result<Cell, EngineError> {
    match free_cells(size, excluding)?.choose(rng) {
        Some(cell) => Ok(cell),
        None => {
            warn!(size, "no free cell left for food");
            Err(EngineError::BoardFull)
        }
    }
}
