//! The cyclic path tokens race along
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::error::EngineError;
use crate::types::{grid_extent, Cell};

/// The fixed cycle of board cells tokens move along
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct TokenPath {
    cells: Vec<Cell>,
}

impl TokenPath {
    /// build a path from an ordered list of cells, which must not be empty
    pub fn new(cells: Vec<Cell>) -> Result<Self, EngineError> {
        if cells.is_empty() {
            return Err(EngineError::InvalidInput("token path is empty".to_string()));
        }
        Ok(TokenPath { cells })
    }

    /// The clockwise ring around the border of a `size x size` board, starting
    /// in the top left corner. A board of size 1 has a single cell path.
    pub fn perimeter(size: u32) -> Result<Self, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidInput("board size must be at least 1".to_string()));
        }
        let last = grid_extent(size)? - 1;
        if last == 0 {
            return TokenPath::new(vec![Cell::new(0, 0)]);
        }

        let top = (0..last).map(|col| Cell::new(0, col));
        let right = (0..last).map(|row| Cell::new(row, last));
        let bottom = (1..=last).rev().map(|col| Cell::new(last, col));
        let left = (1..=last).rev().map(|row| Cell::new(row, 0));

        TokenPath::new(top.chain(right).chain(bottom).chain(left).collect())
    }

    /// number of cells, always at least 1
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// always false
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// the cell at `index`, wrapping around the cycle
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index % self.cells.len()]
    }

    /// the index reached after moving `steps` cells forward from `index`
    pub fn advance(&self, index: usize, steps: usize) -> usize {
        (index + steps) % self.cells.len()
    }

    #[allow(missing_docs)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl TryFrom<Vec<Cell>> for TokenPath {
    type Error = EngineError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        TokenPath::new(cells)
    }
}

impl From<TokenPath> for Vec<Cell> {
    fn from(path: TokenPath) -> Self {
        path.cells
    }
}
