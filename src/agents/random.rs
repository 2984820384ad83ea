//! A uniform-random legal-move agent, useful as a baseline opponent and for
//! fuzzing the move generator.

use crate::core::board::Board;
use crate::core::moves::Move;
use crate::core::movegen::generate_legal_moves;

/// Picks uniformly among the legal moves for `board`'s side to move.
///
/// Returns `None` only when no legal move exists (a terminal position).
#[must_use]
pub fn choose_move(board: &Board) -> Option<Move> {
    let moves = generate_legal_moves(board);
    if moves.is_empty() {
        return None;
    }
    let idx = fastrand::usize(..moves.len());
    Some(moves[idx].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_returns_a_generated_move() {
        let board = Board::starting_position();
        let legal = generate_legal_moves(&board);
        let chosen = choose_move(&board).unwrap();
        assert!(legal.contains(&chosen));
    }
}
