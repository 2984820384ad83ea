//! Terminal detection: HQ capture, stalemate, and offered/accepted draws.

use super::board::Board;
use super::movegen::generate_legal_moves;
use super::piece::Side;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Why the game ended.
pub enum Termination {
    HqCapture,
    Stalemate,
    Draw,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// The terminal result of a position, if any.
pub struct Outcome {
    pub termination: Termination,
    pub winner: Option<Side>,
}

impl Outcome {
    #[must_use]
    /// The PGN-style result string: `1-0`, `0-1`, or `1/2-1/2`.
    pub const fn result_string(&self) -> &'static str {
        match self.winner {
            Some(Side::Red) => "1-0",
            Some(Side::Blue) => "0-1",
            None => "1/2-1/2",
        }
    }
}

#[must_use]
/// Determine whether `board` is a terminal position, and if so, how.
pub fn outcome(board: &Board) -> Option<Outcome> {
    if board.did_accept_draw() {
        return Some(Outcome { termination: Termination::Draw, winner: None });
    }

    if board.hq_square(Side::Red).is_none() {
        return Some(Outcome { termination: Termination::HqCapture, winner: Some(Side::Blue) });
    }
    if board.hq_square(Side::Blue).is_none() {
        return Some(Outcome { termination: Termination::HqCapture, winner: Some(Side::Red) });
    }

    if generate_legal_moves(board).is_empty() {
        return Some(Outcome { termination: Termination::Stalemate, winner: None });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::board::Board;
    use super::super::piece::PieceType;
    use super::super::square::Square;

    #[test]
    fn starting_position_has_no_outcome() {
        let b = Board::starting_position();
        assert!(outcome(&b).is_none());
    }

    #[test]
    fn missing_hq_ends_the_game() {
        let mut b = Board::starting_position();
        let blue_hq = b.hq_square(Side::Blue).unwrap();
        b.remove_piece(blue_hq);
        let result = outcome(&b).unwrap();
        assert_eq!(result.termination, Termination::HqCapture);
        assert_eq!(result.winner, Some(Side::Red));
        assert_eq!(result.result_string(), "1-0");
    }

    #[test]
    fn accepted_draw_has_no_winner() {
        let mut b = Board::empty();
        b.place_piece(Square::new(0, 0).unwrap(), super::super::piece::Piece::new(PieceType::Hq, Side::Red, None));
        b.place_piece(Square::new(7, 7).unwrap(), super::super::piece::Piece::new(PieceType::Hq, Side::Blue, None));
        b.set_accept_draw(true);
        let result = outcome(&b).unwrap();
        assert_eq!(result.termination, Termination::Draw);
        assert_eq!(result.result_string(), "1/2-1/2");
    }
}
