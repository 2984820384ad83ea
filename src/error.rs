//! Error types surfaced from public entry points.

use std::fmt::{self, Display, Formatter};

use crate::core::piece::PieceType;

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
/// The ways a fallible entry point into this crate can fail.
///
/// Internal invariant violations (for example, calling
/// [`crate::core::apply::push`] with a move that was not produced by the
/// generator) are not part of this enum: those are programmer errors and are
/// reported with an assertion instead of a recoverable `Err`.
pub enum GhqError {
    /// A position, move, or binary payload could not be parsed.
    ParseError(String),
    /// A `Reinforce` was requested for a piece type with zero count in the
    /// mover's reserve.
    OutOfReserve(PieceType),
    /// A square index or orientation fell outside its valid range.
    OutOfBounds(&'static str),
    /// The given move does not appear among the moves the generator
    /// produces for the current position.
    IllegalMove(String),
}

impl Display for GhqError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GhqError::ParseError(msg) => write!(f, "parse error: {msg}"),
            GhqError::OutOfReserve(pt) => write!(f, "no {pt:?} left in reserve"),
            GhqError::OutOfBounds(what) => write!(f, "out of bounds: {what}"),
            GhqError::IllegalMove(uci) => write!(f, "illegal move: {uci}"),
        }
    }
}

impl std::error::Error for GhqError {}
