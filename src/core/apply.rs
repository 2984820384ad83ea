//! `push`, the move-application state transition.

use super::board::Board;
use super::moves::{AutoCaptureKind, Move};
use super::piece::Piece;

/// Apply `m` to `board` in place.
///
/// `m` must be one of the moves [`super::movegen::generate_legal_moves`]
/// would produce for `board`'s current state; applying anything else is a
/// programmer error, caught here by
/// `debug_assert!`/`expect` rather than a recoverable `Result`.
pub fn push(board: &mut Board, m: Move) {
    if !matches!(m, Move::Skip) {
        board.set_offer_draw(false);
    }

    match m.clone() {
        Move::Reinforce { unit_type, to, capture_preference } => {
            let side = board.turn();
            board
                .reserve_mut(side)
                .remove(unit_type, 1)
                .expect("reinforcement requires a unit in reserve");
            board.place_piece(to, Piece::new(unit_type, side, None));
            apply_capture_preference(board, capture_preference);
            finish_player_action(board, to);
        }
        Move::Move { from, to, capture_preference } => {
            let piece = board.remove_piece(from).expect("move source must be occupied");
            board.place_piece(to, piece);
            apply_capture_preference(board, capture_preference);
            finish_player_action(board, to);
        }
        Move::MoveAndOrient { from, to, orientation } => {
            let piece = board.remove_piece(from).expect("move source must be occupied");
            let facing = orientation.unwrap_or_else(|| piece.orientation.expect("artillery carries an orientation"));
            board.place_piece(to, Piece::new(piece.piece_type, piece.side, Some(facing)));
            finish_player_action(board, to);
        }
        Move::AutoCapture { kind, target } => {
            board.remove_piece(target).expect("auto-capture target must be occupied");
            if matches!(kind, AutoCaptureKind::Free) {
                board.consume_free_capture_allowance(target);
            }
            board.increment_turn_auto_moves();
        }
        Move::Skip => {
            if board.turn_moves() == 0 {
                if board.did_offer_draw() {
                    board.set_accept_draw(true);
                } else {
                    board.set_offer_draw(true);
                }
            }
            board.push_history(m);
            board.flip_side_and_reset_turn();
            return;
        }
    }

    board.push_history(m);
}

fn apply_capture_preference(board: &mut Board, capture_preference: Option<super::square::Square>) {
    if let Some(sq) = capture_preference {
        board.remove_piece(sq).expect("capture preference must name an occupied square");
        board.consume_free_capture_allowance(sq);
    }
}

fn finish_player_action(board: &mut Board, to: super::square::Square) {
    board.mark_turn_piece(to);
    board.increment_turn_moves();
    if board.turn_moves() >= 3 {
        board.flip_side_and_reset_turn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::board::Board;
    use super::super::piece::Side;
    use super::super::square::Square;

    #[test]
    fn move_marks_turn_piece_and_increments_turn_moves() {
        let mut b = Board::starting_position();
        let from = Square::new(1, 5).unwrap();
        let to = Square::new(2, 5).unwrap();
        push(&mut b, Move::Move { from, to, capture_preference: None });
        assert_eq!(b.turn(), Side::Red);
        assert_eq!(b.turn_moves(), 1);
        assert!(b.turn_pieces().contains(to));
        assert_eq!(b.piece_type_at(to), Some(super::super::piece::PieceType::Infantry));
    }

    #[test]
    fn third_action_flips_side() {
        let mut b = Board::starting_position();
        for _ in 0..3 {
            push(&mut b, Move::Skip);
            if b.turn() == Side::Blue {
                break;
            }
        }
        assert_eq!(b.turn(), Side::Blue);
    }

    #[test]
    fn free_capture_consumes_allowance_and_unblocks_normal_actions() {
        use super::super::piece::{Piece, PieceType};
        use super::super::movegen::generate_legal_moves;

        let mut b = Board::empty();
        b.place_piece(Square::new(0, 7).unwrap(), Piece::new(PieceType::Hq, Side::Red, None));
        b.place_piece(Square::new(7, 0).unwrap(), Piece::new(PieceType::Hq, Side::Blue, None));
        b.place_piece(Square::new(4, 3).unwrap(), Piece::new(PieceType::Infantry, Side::Red, None));
        b.place_piece(Square::new(4, 5).unwrap(), Piece::new(PieceType::Infantry, Side::Red, None));
        b.place_piece(Square::new(4, 4).unwrap(), Piece::new(PieceType::Infantry, Side::Blue, None));
        b.refresh_free_capture_snapshot();

        let target = Square::new(4, 4).unwrap();
        push(&mut b, Move::AutoCapture { kind: AutoCaptureKind::Free, target });

        assert!(b.free_capture().allowance.is_empty());
        assert!(b.piece_at(target).is_none());

        let moves = generate_legal_moves(&b);
        assert!(moves.iter().any(|m| !matches!(m, Move::AutoCapture { .. })));
    }

    #[test]
    fn skip_twice_in_a_row_offers_then_accepts_draw() {
        let mut b = Board::starting_position();
        push(&mut b, Move::Skip);
        assert!(b.did_offer_draw());
        assert_eq!(b.turn(), Side::Blue);
        push(&mut b, Move::Skip);
        assert!(b.did_accept_draw());
    }
}
