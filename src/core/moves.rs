//! The tagged-variant move type.
//!
//! A sum type with one case per move kind, carrying only the fields that
//! kind needs, rather than one wide record with a pile of optional fields.

use super::direction::Orientation;
use super::piece::PieceType;
use super::square::Square;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Which mandatory removal an [`Move::AutoCapture`] resolves.
pub enum AutoCaptureKind {
    /// A piece standing on a square bombarded by the opponent's artillery.
    Bombard,
    /// A piece nominated under a cluster's free-capture allowance.
    Free,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One action, as generated by [`super::movegen`] and applied by
/// [`super::apply::push`].
pub enum Move {
    /// Deploy a reserved unit onto the back rank.
    Reinforce {
        unit_type: PieceType,
        to: Square,
        capture_preference: Option<Square>,
    },
    /// Relocate the piece at `from` to `to`.
    Move {
        from: Square,
        to: Square,
        capture_preference: Option<Square>,
    },
    /// Relocate (or rotate in place) an artillery piece, optionally changing
    /// its facing.
    MoveAndOrient {
        from: Square,
        to: Square,
        orientation: Option<Orientation>,
    },
    /// A mandatory capture resolved at the start of a turn.
    AutoCapture {
        kind: AutoCaptureKind,
        target: Square,
    },
    /// End the turn without a normal action; the first Skip of a turn
    /// offers a draw, and a reply in kind accepts it.
    Skip,
}

impl Move {
    #[must_use]
    /// Whether this move is one of the mandatory, turn-action-free removals
    /// resolved at the start of a turn.
    pub const fn is_auto_capture(&self) -> bool {
        matches!(self, Move::AutoCapture { .. })
    }
}
