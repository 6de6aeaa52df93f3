//! errors returned by the engines
use thiserror::Error;

/// Errors that can occur while driving an engine. None of them are fatal to the
/// host: the caller decides how to surface them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The operation was invoked on an engine in a terminal or invalid state
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// There is no free cell left to place food on
    #[error("board is full, no free cell for food")]
    BoardFull,

    /// The caller supplied an input the engine does not accept
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
