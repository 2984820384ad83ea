//! Artillery bombardment geometry.
//!
//! An artillery piece does not move to bombard; it projects its
//! [`PieceType::bombardment_range`] along its facing [`Orientation`] and
//! hits every square from just past itself up to (and including) the
//! resulting target square. Cardinal orientations simply clamp the target
//! onto the board; diagonal orientations must back the *range* off so that
//! both the file and rank coordinates land in bounds together, rather than
//! independently clamping each axis (which would bend the line).

use super::direction::Orientation;
use super::piece::PieceType;
use super::square::Square;
use super::tables::TABLES;
use super::bitboard::Mask;

#[must_use]
/// The square an artillery piece at `square`, facing `orientation`, with
/// piece type `piece_type`, projects its bombardment onto.
///
/// If the facing points off the board immediately (the artillery already
/// sits on the edge in that direction), the target is `square` itself and
/// [`covered_squares`] will report an empty segment.
pub fn target_square(square: Square, orientation: Orientation, piece_type: PieceType) -> Square {
    let range = i32::from(piece_type.bombardment_range());
    let (df, dr) = orientation.step();
    let (df, dr) = (i32::from(df), i32::from(dr));
    let file = square.file() as i32;
    let rank = square.rank() as i32;

    let (new_file, new_rank) = if orientation.is_cardinal() {
        ((file + df * range).clamp(0, 7), (rank + dr * range).clamp(0, 7))
    } else {
        let file_room = if df > 0 { 7 - file } else { file };
        let rank_room = if dr > 0 { 7 - rank } else { rank };
        let effective = range.min(file_room).min(rank_room);
        (file + df * effective, rank + dr * effective)
    };
    Square::new(new_rank as usize, new_file as usize).unwrap()
}

#[must_use]
/// The target square and the line of squares it bombards: every square from
/// one step past `square` (exclusive of `square` itself) up to the target,
/// inclusive. Empty if the facing points off the board with no room to
/// project at all.
pub fn covered_squares(square: Square, orientation: Orientation, piece_type: PieceType) -> (Square, Mask) {
    let target = target_square(square, orientation, piece_type);
    let covered = TABLES.ray_between_inclusive_end(square, target);
    (target, covered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::piece::PieceType;

    #[test]
    fn cardinal_clamps_to_board_edge() {
        let sq = Square::new(6, 3).unwrap();
        let target = target_square(sq, Orientation::North, PieceType::Artillery);
        assert_eq!(target, Square::new(7, 3).unwrap());
    }

    #[test]
    fn diagonal_backs_off_to_stay_on_line() {
        // One square from the north edge and three from the east edge:
        // a naive per-axis clamp would bend the line, so the diagonal must
        // back off its full range of 2 down to 1 to keep file and rank in
        // lockstep.
        let sq = Square::new(6, 4).unwrap();
        let target = target_square(sq, Orientation::NorthEast, PieceType::Artillery);
        assert_eq!(target, Square::new(7, 5).unwrap());
    }

    #[test]
    fn covered_segment_excludes_artillery_includes_target() {
        let sq = Square::new(3, 3).unwrap();
        let (target, covered) = covered_squares(sq, Orientation::East, PieceType::Artillery);
        assert_eq!(target, Square::new(3, 5).unwrap());
        assert!(!covered.contains(sq));
        assert!(covered.contains(target));
        assert_eq!(covered.len(), 2);
    }

    #[test]
    fn heavy_artillery_has_longer_range() {
        let sq = Square::new(3, 3).unwrap();
        let (_, covered) = covered_squares(sq, Orientation::East, PieceType::HeavyArtillery);
        assert_eq!(covered.len(), 3);
    }

    #[test]
    fn edge_facing_off_board_covers_nothing() {
        let sq = Square::new(7, 3).unwrap();
        let (target, covered) = covered_squares(sq, Orientation::North, PieceType::Artillery);
        assert_eq!(target, sq);
        assert!(covered.is_empty());
    }
}
