//! various types shared by the snake and token race engines
use serde::{Deserialize, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::time::Duration;

use crate::error::EngineError;

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    /// row offset
    pub row: i32,
    /// column offset
    pub col: i32,
}

/// Convert a board side length to the largest coordinate type. Boards wider than
/// `i32::MAX` cells cannot be addressed by [Cell].
pub fn grid_extent(size: u32) -> Result<i32, EngineError> {
    i32::try_from(size).map_err(|_| {
        EngineError::InvalidInput(format!(
            "board size {} is larger than {}",
            size,
            i32::MAX
        ))
    })
}

/// A cell on a square grid, addressed as `(row, col)` with row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    #[allow(missing_docs)]
    pub row: i32,
    #[allow(missing_docs)]
    pub col: i32,
}

impl Cell {
    #[allow(missing_docs)]
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    /// translate this cell by a vector
    pub fn add_vec(&self, v: Vector) -> Cell {
        Cell {
            row: self.row + v.row,
            col: self.col + v.col,
        }
    }

    /// the cell one step along the given direction
    pub fn moved(&self, direction: Direction) -> Cell {
        self.add_vec(direction.to_vector())
    }

    /// checks whether this cell lies on a `size x size` board
    pub fn in_bounds(&self, size: u32) -> bool {
        let size = size as i64;
        (0..size).contains(&(self.row as i64)) && (0..size).contains(&(self.col as i64))
    }

    /// true when the two cells share an edge
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Represents a heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl Direction {
    /// convert this direction to a vector. Up decreases the row.
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Left => Vector { row: 0, col: -1 },
            Direction::Right => Vector { row: 0, col: 1 },
            Direction::Up => Vector { row: -1, col: 0 },
            Direction::Down => Vector { row: 1, col: 0 },
        }
    }

    /// create a Direction from a unit vector, None for anything else
    pub fn from_vector(vector: Vector) -> Option<Self> {
        match vector {
            Vector { row: 0, col: -1 } => Some(Self::Left),
            Vector { row: 0, col: 1 } => Some(Self::Right),
            Vector { row: -1, col: 0 } => Some(Self::Up),
            Vector { row: 1, col: 0 } => Some(Self::Down),
            _ => None,
        }
    }

    /// returns all four directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// the direct reversal of this direction
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// checks if a given direction is not opposite this one. e.g. Up is not opposite to Left, but is opposite to Down
    pub fn is_not_opposite(&self, other: &Direction) -> bool {
        self.opposite() != *other
    }
}

/// token to represent a player in the token race
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[repr(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// convert this player ID to a usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Instruments to be used when driving an engine
pub trait EngineInstruments: std::fmt::Debug {
    #[allow(missing_docs)]
    fn observe_step(&self, duration: Duration);
}

/// A game which can tell whether it has reached a terminal state
pub trait OverDeterminableGame: std::fmt::Debug {
    #[allow(missing_docs)]
    fn is_over(&self) -> bool;
}

/// a game for which the size of the game board can be determined
pub trait SizeDeterminableGame {
    #[allow(missing_docs)]
    fn get_width(&self) -> u32;
    #[allow(missing_docs)]
    fn get_height(&self) -> u32;
}

/// a game for which the current turn is determinable
pub trait TurnDeterminableGame {
    #[allow(missing_docs)]
    fn turn(&self) -> u64;
}

/// A game where an entire snake body is gettable
pub trait SnakeBodyGettableGame {
    /// return a Vec of the cells of the snake body, in order from head to tail
    fn get_snake_body_vec(&self) -> Vec<Cell>;
}
