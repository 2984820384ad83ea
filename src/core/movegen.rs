//! The per-turn legal move generator.

use std::collections::HashMap;

use super::bitboard::Mask;
use super::board::{Board, FreeCaptureSnapshot};
use super::clusters;
use super::direction::Orientation;
use super::moves::{AutoCaptureKind, Move};
use super::piece::{PieceType, Side};
use super::square::Square;
use super::tables::TABLES;

/// Whether an enemy artillery at `a` shields `s` from free capture: its
/// facing points straight at `s` (diagonal orientations never shield).
fn is_shielded(board: &Board, attacker_sq: Square, enemy_side: Side) -> bool {
    for artillery_sq in (board.artillery_mask() & board.occupied_by(enemy_side)).iter() {
        let Some(orientation) = board.orientation_at(artillery_sq) else {
            continue;
        };
        if !orientation.is_cardinal() {
            continue;
        }
        let (df, dr) = orientation.step();
        let file = artillery_sq.file() as i32 + i32::from(df);
        let rank = artillery_sq.rank() as i32 + i32::from(dr);
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            let pointed_at = Square::new(rank as usize, file as usize).unwrap();
            if pointed_at == attacker_sq {
                return true;
            }
        }
    }
    false
}

/// Compute the free-capture snapshot for `side`, optionally over a
/// hypothetical board where the attacker at `relocated_from` (if any) has
/// relocated to `relocated_to`.
pub(super) fn compute_free_capture_snapshot(
    board: &Board,
    side: Side,
    relocated_from: Option<Square>,
    relocated_to: Option<Square>,
) -> FreeCaptureSnapshot {
    let enemy = side.other();
    let mut attackers = board.occupied_by(side) & board.infantry_mask();
    if let Some(from) = relocated_from {
        attackers &= !Mask::from_square(from);
    }
    if let Some(to) = relocated_to {
        attackers |= Mask::from_square(to);
    }
    let defenders = board.occupied_by(enemy) & board.infantry_mask();

    let cluster_pairs = clusters::find_adjacency_clusters(attackers, defenders, |sq| TABLES.adjacent(sq));

    let mut clusters_mask = Mask::EMPTY;
    let mut capturable_enemies = Mask::EMPTY;
    let mut allowance = Mask::EMPTY;
    let mut cluster_allowance_of: HashMap<Square, u32> = HashMap::new();

    for (att_mask, def_mask) in cluster_pairs {
        let mut cluster_capturable = Mask::EMPTY;
        for sq in att_mask.iter() {
            let candidates = TABLES.adjacent(sq) & def_mask;
            for enemy_sq in candidates.iter() {
                if !is_shielded(board, sq, enemy) {
                    cluster_capturable.insert(enemy_sq);
                }
            }
        }
        if cluster_capturable.is_empty() {
            continue;
        }

        let a = att_mask.len();
        let d = def_mask.len();
        let cluster_allowance = a.saturating_sub(d);
        let cluster_allowance_mask = att_mask.highest_n(cluster_allowance);

        clusters_mask |= att_mask;
        clusters_mask |= def_mask;
        allowance |= cluster_allowance_mask;
        capturable_enemies |= cluster_capturable;

        for sq in att_mask.iter() {
            cluster_allowance_of.insert(sq, cluster_allowance);
        }
    }

    // HQ siege: counted independently of the
    // infantry clusters above, since HQ is not infantry and never forms
    // one.
    if let Some(hq_sq) = board.hq_square(enemy) {
        let hq_adjacent_attackers = TABLES.adjacent(hq_sq) & attackers;
        let mut weighted = 0u32;
        for atk_sq in hq_adjacent_attackers.iter() {
            let weight = match cluster_allowance_of.get(&atk_sq) {
                Some(1) => 1,
                _ => 2,
            };
            weighted += weight;
        }
        if weighted > 1 {
            capturable_enemies.insert(hq_sq);
            clusters_mask |= hq_adjacent_attackers;
            clusters_mask.insert(hq_sq);
        }
    }

    FreeCaptureSnapshot {
        clusters: clusters_mask,
        capturable_enemies,
        allowance,
    }
}

fn path_clear_of_bombardment(from: Square, to: Square, enemy_bombarded: Mask) -> bool {
    let path = TABLES.ray_between_inclusive_end(from, to) & !Mask::from_square(to);
    (path & enemy_bombarded).is_empty()
}

/// Destinations reachable by the piece at `sq` (movement only, ignoring
/// `turn_pieces` and artillery orientation pairing).
fn movement_mask(board: &Board, sq: Square, pt: PieceType, side: Side) -> Mask {
    let enemy = side.other();
    let empty_and_safe = !board.occupied() & !board.bombarded_by(enemy);

    match pt {
        PieceType::Hq => TABLES.regular_moves(sq) & empty_and_safe,
        PieceType::Infantry => TABLES.regular_moves(sq) & empty_and_safe,
        PieceType::AirborneInfantry => {
            if sq.rank() == side.back_rank() {
                empty_and_safe
            } else {
                TABLES.regular_moves(sq) & empty_and_safe
            }
        }
        PieceType::Artillery | PieceType::HeavyArtillery => TABLES.regular_moves(sq) & empty_and_safe,
        PieceType::ArmoredInfantry => {
            let mut mask = TABLES.armored_moves(sq, board.occupied()) & empty_and_safe;
            for d in mask.iter() {
                if !path_clear_of_bombardment(sq, d, board.bombarded_by(enemy)) {
                    mask.remove(d);
                }
            }
            if board.adjacent_to_infantry(enemy).contains(sq) {
                mask &= !board.adjacent_to_infantry(enemy);
            }
            mask
        }
        PieceType::ArmoredArtillery => {
            let mut mask = TABLES.armored_moves(sq, board.occupied()) & empty_and_safe;
            for d in mask.iter() {
                if !path_clear_of_bombardment(sq, d, board.bombarded_by(enemy)) {
                    mask.remove(d);
                }
            }
            mask
        }
    }
}

/// Enumerate the capture-preference options for a move landing on `to`:
/// `None` (decline) plus every free-capturable enemy adjacent to `to` under
/// the hypothetical post-move state.
fn capture_preferences(board: &Board, side: Side, from: Option<Square>, to: Square) -> Vec<Option<Square>> {
    let mut options = vec![None];
    let lands_adjacent_to_enemy = !(TABLES.adjacent(to) & board.occupied_by(side.other())).is_empty();
    if !lands_adjacent_to_enemy {
        return options;
    }
    let snapshot = compute_free_capture_snapshot(board, side, from, Some(to));
    let nominable = snapshot.capturable_enemies & TABLES.adjacent(to);
    for sq in nominable.iter() {
        options.push(Some(sq));
    }
    options
}

fn push_reinforce_moves(board: &Board, side: Side, out: &mut Vec<Move>) {
    let enemy = side.other();
    let back_rank_empty_safe =
        !board.occupied() & !board.bombarded_by(enemy) & !board.turn_pieces() & Mask::new(0xFFu64 << (8 * side.back_rank()));
    for pt in PieceType::RESERVABLE {
        if board.reserve(side).count(pt) == 0 {
            continue;
        }
        for to in back_rank_empty_safe.iter() {
            for capture_preference in capture_preferences(board, side, None, to) {
                out.push(Move::Reinforce { unit_type: pt, to, capture_preference });
            }
        }
    }
}

fn push_move_moves(board: &Board, side: Side, out: &mut Vec<Move>) {
    let movable_types = [
        PieceType::Hq,
        PieceType::Infantry,
        PieceType::AirborneInfantry,
        PieceType::ArmoredInfantry,
    ];
    for &pt in &movable_types {
        for from in (board.piece_mask(pt) & board.occupied_by(side) & !board.turn_pieces()).iter() {
            let destinations = movement_mask(board, from, pt, side) & !board.turn_pieces();
            for to in destinations.iter() {
                for capture_preference in capture_preferences(board, side, Some(from), to) {
                    out.push(Move::Move { from, to, capture_preference });
                }
            }
        }
    }
}

fn push_artillery_moves(board: &Board, side: Side, out: &mut Vec<Move>) {
    let artillery_types = [PieceType::Artillery, PieceType::ArmoredArtillery, PieceType::HeavyArtillery];
    for &pt in &artillery_types {
        for from in (board.piece_mask(pt) & board.occupied_by(side) & !board.turn_pieces()).iter() {
            let current = board.orientation_at(from).expect("artillery must carry an orientation");
            let mut destinations = movement_mask(board, from, pt, side) & !board.turn_pieces();
            destinations.insert(from);
            for to in destinations.iter() {
                if to == from {
                    for orientation in Orientation::ALL {
                        if orientation != current {
                            out.push(Move::MoveAndOrient { from, to, orientation: Some(orientation) });
                        }
                    }
                } else {
                    out.push(Move::MoveAndOrient { from, to, orientation: None });
                    for orientation in Orientation::ALL {
                        if orientation != current {
                            out.push(Move::MoveAndOrient { from, to, orientation: Some(orientation) });
                        }
                    }
                }
            }
        }
    }
}

#[must_use]
/// Generate every legal move for the side to move, honoring the turn state
/// machine: mandatory bombardment removals, then mandatory free captures,
/// then up to three normal actions or a Skip.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let side = board.turn();
    let enemy = side.other();

    let bombarded_enemies = board.occupied_by(enemy) & board.bombarded_by(side);
    if !bombarded_enemies.is_empty() {
        return bombarded_enemies
            .iter()
            .map(|sq| Move::AutoCapture { kind: AutoCaptureKind::Bombard, target: sq })
            .collect();
    }

    let snapshot = board.free_capture();
    if !snapshot.allowance.is_empty() {
        return snapshot
            .capturable_enemies
            .iter()
            .map(|sq| Move::AutoCapture { kind: AutoCaptureKind::Free, target: sq })
            .collect();
    }

    let mut moves = Vec::new();
    push_reinforce_moves(board, side, &mut moves);
    push_move_moves(board, side, &mut moves);
    push_artillery_moves(board, side, &mut moves);
    moves.push(Move::Skip);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::board::Board;
    use super::super::piece::{Piece, PieceType, Side};

    #[test]
    fn starting_position_has_legal_moves() {
        let b = Board::starting_position();
        let moves = generate_legal_moves(&b);
        assert!(!moves.is_empty());
        assert!(moves.iter().any(|m| matches!(m, Move::Skip)));
    }

    #[test]
    fn starting_position_has_no_pending_free_captures() {
        let b = Board::starting_position();
        let snapshot = compute_free_capture_snapshot(&b, Side::Red, None, None);
        assert!(snapshot.allowance.is_empty());
        assert!(snapshot.capturable_enemies.is_empty());
    }

    #[test]
    fn isolated_attacker_contributes_no_allowance() {
        let mut b = Board::empty();
        b.place_piece(Square::new(0, 7).unwrap(), Piece::new(PieceType::Hq, Side::Red, None));
        b.place_piece(Square::new(7, 0).unwrap(), Piece::new(PieceType::Hq, Side::Blue, None));
        b.place_piece(Square::new(4, 4).unwrap(), Piece::new(PieceType::Infantry, Side::Red, None));
        let snapshot = compute_free_capture_snapshot(&b, Side::Red, None, None);
        assert!(snapshot.allowance.is_empty());
        assert!(snapshot.clusters.is_empty());
    }

    #[test]
    fn mandatory_bombardment_excludes_other_moves() {
        let mut b = Board::empty();
        b.place_piece(Square::new(1, 3).unwrap(), Piece::new(PieceType::Artillery, Side::Red, Some(Orientation::North)));
        b.place_piece(Square::new(0, 7).unwrap(), Piece::new(PieceType::Hq, Side::Red, None));
        b.place_piece(Square::new(7, 0).unwrap(), Piece::new(PieceType::Hq, Side::Blue, None));
        b.place_piece(Square::new(4, 3).unwrap(), Piece::new(PieceType::Infantry, Side::Blue, None));
        b.force_turn(Side::Blue);
        let moves = generate_legal_moves(&b);
        assert!(moves.iter().all(|m| matches!(m, Move::AutoCapture { kind: AutoCaptureKind::Bombard, .. })));
    }
}
