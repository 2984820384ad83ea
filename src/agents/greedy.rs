//! A one-ply greedy agent: try every legal move, keep the one whose
//! resulting position [`evaluate`] rates best for the side that played it.

use crate::core::apply;
use crate::core::board::Board;
use crate::core::moves::Move;
use crate::core::movegen::generate_legal_moves;
use crate::core::piece::Side;

use super::evaluate::evaluate;

/// Returns `None` only when no legal move exists (a terminal position).
#[must_use]
pub fn choose_move(board: &Board) -> Option<Move> {
    let mover = board.turn();
    let mut best: Option<(Move, f64)> = None;

    for m in generate_legal_moves(board) {
        let mut scratch = board.clone();
        apply::push(&mut scratch, m.clone());
        let score = match mover {
            Side::Red => evaluate(&scratch),
            Side::Blue => -evaluate(&scratch),
        };
        let improves = match &best {
            Some((_, best_score)) => score > *best_score,
            None => true,
        };
        if improves {
            best = Some((m, score));
        }
    }

    best.map(|(m, _)| m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_a_move_that_captures_a_bombarded_piece() {
        use crate::core::direction::Orientation;
        use crate::core::piece::{Piece, PieceType};
        use crate::core::square::Square;

        let mut board = Board::empty();
        board.place_piece(Square::new(0, 7).unwrap(), Piece::new(PieceType::Hq, Side::Red, None));
        board.place_piece(Square::new(7, 0).unwrap(), Piece::new(PieceType::Hq, Side::Blue, None));
        board.place_piece(
            Square::new(1, 3).unwrap(),
            Piece::new(PieceType::Artillery, Side::Red, Some(Orientation::North)),
        );
        board.place_piece(Square::new(4, 3).unwrap(), Piece::new(PieceType::Infantry, Side::Blue, None));
        board.force_turn(Side::Blue);

        let chosen = choose_move(&board).unwrap();
        assert!(matches!(chosen, Move::AutoCapture { .. }));
    }

    #[test]
    fn always_returns_a_generated_move() {
        let board = Board::starting_position();
        let legal = generate_legal_moves(&board);
        let chosen = choose_move(&board).unwrap();
        assert!(legal.contains(&chosen));
    }
}
