//! A scalar position evaluator: material, a forward-rank gradient, fixed
//! penalties for airborne infantry and HQ exposure, and bombarded-square
//! control, all from the side to move's perspective resolved after any
//! currently-pending mandatory captures.

use crate::core::apply;
use crate::core::board::Board;
use crate::core::moves::Move;
use crate::core::movegen::generate_legal_moves;
use crate::core::piece::{PieceType, Side};
use crate::core::square::Square;

fn piece_value(pt: PieceType) -> f64 {
    match pt {
        PieceType::Hq => 100.0,
        PieceType::Infantry => 1.0,
        PieceType::ArmoredInfantry => 2.0,
        PieceType::AirborneInfantry => 4.0,
        PieceType::Artillery => 3.0,
        PieceType::ArmoredArtillery => 4.0,
        PieceType::HeavyArtillery => 5.0,
    }
}

fn positional_multiplier(pt: PieceType) -> f64 {
    match pt {
        PieceType::Artillery | PieceType::ArmoredArtillery | PieceType::HeavyArtillery => 1.0,
        PieceType::AirborneInfantry => -3.0,
        PieceType::Hq => -0.2,
        PieceType::Infantry | PieceType::ArmoredInfantry => 0.5,
    }
}

/// One row per rank (0 = a side's own back rank), symmetric across files,
/// rewarding central and forward-advancing squares.
#[rustfmt::skip]
const RANK_GRADIENT: [[f64; 8]; 8] = [
    [0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00],
    [0.05, 0.07, 0.09, 0.10, 0.10, 0.09, 0.07, 0.05],
    [0.15, 0.17, 0.19, 0.20, 0.20, 0.19, 0.17, 0.15],
    [0.25, 0.27, 0.29, 0.30, 0.30, 0.29, 0.27, 0.25],
    [0.35, 0.37, 0.39, 0.40, 0.40, 0.39, 0.37, 0.35],
    [0.45, 0.47, 0.49, 0.50, 0.50, 0.49, 0.47, 0.45],
    [0.55, 0.57, 0.59, 0.60, 0.60, 0.59, 0.57, 0.55],
    [0.65, 0.67, 0.69, 0.70, 0.70, 0.69, 0.67, 0.65],
];

/// The gradient value of `sq` from `side`'s perspective: rank 0 is always
/// that side's own back rank, so advancing toward the opponent increases it.
fn gradient(side: Side, sq: Square) -> f64 {
    let relative_rank = match side {
        Side::Red => sq.rank(),
        Side::Blue => 7 - sq.rank(),
    };
    RANK_GRADIENT[relative_rank][sq.file()]
}

/// Apply every currently-pending mandatory auto-capture on `board`, in
/// generation order, until none remain.
fn resolve_pending_captures(board: &mut Board) {
    loop {
        let moves = generate_legal_moves(board);
        match moves.into_iter().find(Move::is_auto_capture) {
            Some(m) => apply::push(board, m),
            None => break,
        }
    }
}

fn color_score(board: &Board, side: Side) -> f64 {
    let mut scratch = board.clone();
    if scratch.turn() == side {
        apply::push(&mut scratch, Move::Skip);
    }
    resolve_pending_captures(&mut scratch);

    let mut score = 0.0;
    for pt in PieceType::ALL {
        let squares = scratch.piece_mask(pt) & scratch.occupied_by(side);
        score += piece_value(pt) * f64::from(squares.len());
        let multiplier = positional_multiplier(pt);
        for sq in squares.iter() {
            score += gradient(side, sq) * multiplier;
        }
    }
    for sq in scratch.bombarded_by(side).iter() {
        score += gradient(side, sq);
    }
    score
}

#[must_use]
/// Score `board` from red's perspective: positive favours red, negative
/// favours blue.
pub fn evaluate(board: &Board) -> f64 {
    color_score(board, Side::Red) - color_score(board, Side::Blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_symmetric() {
        let board = Board::starting_position();
        assert!(evaluate(&board).abs() < 1e-6);
    }

    #[test]
    fn missing_blue_hq_favours_red() {
        let mut board = Board::starting_position();
        let hq = board.hq_square(Side::Blue).unwrap();
        board.remove_piece(hq);
        assert!(evaluate(&board) > 50.0);
    }
}
