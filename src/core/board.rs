//! The board aggregate.

use super::bitboard::Mask;
use super::bombardment;
use super::clusters;
use super::direction::Orientation;
use super::movegen;
use super::moves::Move;
use super::piece::{Piece, PieceType, Side};
use super::reserve::Reserve;
use super::square::{Square, ALL_SQUARES};
use super::tables::TABLES;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A per-cluster free-capture snapshot, recomputed on every side-flip and
/// held until the new side to move finishes resolving its auto-captures
/// until that side's auto-captures finish resolving.
pub struct FreeCaptureSnapshot {
    /// Every square involved in a live free-capture cluster, either side.
    pub clusters: Mask,
    /// Every enemy square some attacker in a cluster may nominate.
    pub capturable_enemies: Mask,
    /// The remaining allowance, one bit per cluster member still free to
    /// fire (highest-indexed attacker squares within a cluster go first).
    pub allowance: Mask,
}

impl FreeCaptureSnapshot {
    const EMPTY: FreeCaptureSnapshot = FreeCaptureSnapshot {
        clusters: Mask::EMPTY,
        capturable_enemies: Mask::EMPTY,
        allowance: Mask::EMPTY,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// The authoritative game state.
pub struct Board {
    occupied: Mask,
    infantry: Mask,
    armored_infantry: Mask,
    airborne: Mask,
    artillery: Mask,
    armored_artillery: Mask,
    heavy: Mask,
    hq: Mask,

    occupied_co: [Mask; 2],
    bombarded_co: [Mask; 2],
    adjacent_infantry_squares_co: [Mask; 2],

    orientation_bit0: Mask,
    orientation_bit1: Mask,
    orientation_bit2: Mask,

    reserves: [Reserve; 2],

    turn: Side,
    turn_moves: i8,
    turn_auto_moves: i8,
    turn_pieces: Mask,

    free_capture: FreeCaptureSnapshot,

    history: Vec<Move>,
    did_offer_draw: bool,
    did_accept_draw: bool,
}

impl Default for Board {
    fn default() -> Board {
        Board::empty()
    }
}

impl Board {
    #[must_use]
    /// A board with no pieces, empty reserves, red to move.
    pub fn empty() -> Board {
        Board {
            occupied: Mask::EMPTY,
            infantry: Mask::EMPTY,
            armored_infantry: Mask::EMPTY,
            airborne: Mask::EMPTY,
            artillery: Mask::EMPTY,
            armored_artillery: Mask::EMPTY,
            heavy: Mask::EMPTY,
            hq: Mask::EMPTY,
            occupied_co: [Mask::EMPTY; 2],
            bombarded_co: [Mask::EMPTY; 2],
            adjacent_infantry_squares_co: [Mask::EMPTY; 2],
            orientation_bit0: Mask::EMPTY,
            orientation_bit1: Mask::EMPTY,
            orientation_bit2: Mask::EMPTY,
            reserves: [Reserve::new(), Reserve::new()],
            turn: Side::Red,
            turn_moves: 0,
            turn_auto_moves: 0,
            turn_pieces: Mask::EMPTY,
            free_capture: FreeCaptureSnapshot::EMPTY,
            history: Vec::new(),
            did_offer_draw: false,
            did_accept_draw: false,
        }
    }

    #[must_use]
    /// The canonical starting position.
    pub fn starting_position() -> Board {
        let mut b = Board::empty();
        let place = |b: &mut Board, rank, file, pt, side, orientation| {
            b.place_piece(
                Square::new(rank, file).unwrap(),
                Piece::new(pt, side, orientation),
            );
        };
        place(&mut b, 0, 6, PieceType::Artillery, Side::Red, Some(Orientation::North));
        place(&mut b, 0, 7, PieceType::Hq, Side::Red, None);
        place(&mut b, 1, 5, PieceType::Infantry, Side::Red, None);
        place(&mut b, 1, 6, PieceType::Infantry, Side::Red, None);
        place(&mut b, 1, 7, PieceType::Infantry, Side::Red, None);

        place(&mut b, 7, 0, PieceType::Hq, Side::Blue, None);
        place(&mut b, 7, 1, PieceType::Artillery, Side::Blue, Some(Orientation::South));
        place(&mut b, 6, 0, PieceType::Infantry, Side::Blue, None);
        place(&mut b, 6, 1, PieceType::Infantry, Side::Blue, None);
        place(&mut b, 6, 2, PieceType::Infantry, Side::Blue, None);

        let starting_reserve = Reserve::from_counts([5, 3, 1, 2, 1, 1]);
        b.reserves[Side::Red.index()] = starting_reserve;
        b.reserves[Side::Blue.index()] = starting_reserve;
        b.refresh_free_capture_snapshot();
        b
    }

    #[must_use]
    /// Build a board from an explicit piece layout, reserves, and side to
    /// move. Bombardment, adjacency, and the free-capture snapshot are
    /// (re)computed from the layout; used by the FEN reader.
    pub fn from_parts(pieces: &[(Square, Piece)], reserves: [Reserve; 2], turn: Side) -> Board {
        let mut b = Board::empty();
        for &(sq, piece) in pieces {
            b.place_piece(sq, piece);
        }
        b.reserves = reserves;
        b.turn = turn;
        b.refresh_free_capture_snapshot();
        b
    }

    #[allow(clippy::too_many_arguments)]
    #[must_use]
    /// Assemble a board directly from the exact fields of the binary
    /// snapshot format, with no recomputation: every cached
    /// mask round-trips byte-for-byte through serialise/deserialise.
    pub(crate) fn from_raw_fields(
        occupied: Mask,
        infantry: Mask,
        armored_infantry: Mask,
        airborne: Mask,
        artillery: Mask,
        armored_artillery: Mask,
        heavy: Mask,
        hq: Mask,
        occupied_co: [Mask; 2],
        bombarded_co: [Mask; 2],
        adjacent_infantry_squares_co: [Mask; 2],
        orientation_bit0: Mask,
        orientation_bit1: Mask,
        orientation_bit2: Mask,
        turn_pieces: Mask,
        free_capture: FreeCaptureSnapshot,
        turn: Side,
        turn_moves: i8,
        turn_auto_moves: i8,
        reserves: [Reserve; 2],
    ) -> Board {
        Board {
            occupied,
            infantry,
            armored_infantry,
            airborne,
            artillery,
            armored_artillery,
            heavy,
            hq,
            occupied_co,
            bombarded_co,
            adjacent_infantry_squares_co,
            orientation_bit0,
            orientation_bit1,
            orientation_bit2,
            reserves,
            turn,
            turn_moves,
            turn_auto_moves,
            turn_pieces,
            free_capture,
            history: Vec::new(),
            did_offer_draw: false,
            did_accept_draw: false,
        }
    }

    // -- queries -----------------------------------------------------

    #[must_use]
    pub const fn occupied(&self) -> Mask {
        self.occupied
    }

    #[must_use]
    pub const fn occupied_by(&self, side: Side) -> Mask {
        self.occupied_co[side as usize]
    }

    #[must_use]
    pub const fn bombarded_by(&self, side: Side) -> Mask {
        self.bombarded_co[side as usize]
    }

    #[must_use]
    pub const fn adjacent_to_infantry(&self, side: Side) -> Mask {
        self.adjacent_infantry_squares_co[side as usize]
    }

    #[must_use]
    /// The mask for a single piece type (side-agnostic).
    pub const fn piece_mask(&self, pt: PieceType) -> Mask {
        match pt {
            PieceType::Hq => self.hq,
            PieceType::Infantry => self.infantry,
            PieceType::ArmoredInfantry => self.armored_infantry,
            PieceType::AirborneInfantry => self.airborne,
            PieceType::Artillery => self.artillery,
            PieceType::ArmoredArtillery => self.armored_artillery,
            PieceType::HeavyArtillery => self.heavy,
        }
    }

    fn piece_mask_mut(&mut self, pt: PieceType) -> &mut Mask {
        match pt {
            PieceType::Hq => &mut self.hq,
            PieceType::Infantry => &mut self.infantry,
            PieceType::ArmoredInfantry => &mut self.armored_infantry,
            PieceType::AirborneInfantry => &mut self.airborne,
            PieceType::Artillery => &mut self.artillery,
            PieceType::ArmoredArtillery => &mut self.armored_artillery,
            PieceType::HeavyArtillery => &mut self.heavy,
        }
    }

    #[must_use]
    /// The union of all three infantry-variant masks.
    pub const fn infantry_mask(&self) -> Mask {
        Mask::new(self.infantry.0 | self.armored_infantry.0 | self.airborne.0)
    }

    #[must_use]
    /// The union of all three artillery-variant masks.
    pub const fn artillery_mask(&self) -> Mask {
        Mask::new(self.artillery.0 | self.armored_artillery.0 | self.heavy.0)
    }

    #[must_use]
    /// The piece type occupying `sq`, if any.
    pub fn piece_type_at(&self, sq: Square) -> Option<PieceType> {
        PieceType::ALL.into_iter().find(|&pt| self.piece_mask(pt).contains(sq))
    }

    #[must_use]
    /// The side occupying `sq`, if any.
    pub fn side_at(&self, sq: Square) -> Option<Side> {
        if self.occupied_co[Side::Red.index()].contains(sq) {
            Some(Side::Red)
        } else if self.occupied_co[Side::Blue.index()].contains(sq) {
            Some(Side::Blue)
        } else {
            None
        }
    }

    #[must_use]
    /// The orientation of the artillery at `sq`, if any artillery is there.
    pub fn orientation_at(&self, sq: Square) -> Option<Orientation> {
        if !self.artillery_mask().contains(sq) {
            return None;
        }
        let b0 = u8::from(self.orientation_bit0.contains(sq));
        let b1 = u8::from(self.orientation_bit1.contains(sq));
        let b2 = u8::from(self.orientation_bit2.contains(sq));
        Orientation::from_index(b0 | (b1 << 1) | (b2 << 2)).ok()
    }

    #[must_use]
    /// The full piece sitting at `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let pt = self.piece_type_at(sq)?;
        let side = self.side_at(sq)?;
        Some(Piece::new(pt, side, self.orientation_at(sq)))
    }

    #[must_use]
    pub fn hq_square(&self, side: Side) -> Option<Square> {
        (self.hq & self.occupied_co[side.index()]).lsb()
    }

    #[must_use]
    pub const fn reserve(&self, side: Side) -> &Reserve {
        &self.reserves[side as usize]
    }

    pub fn reserve_mut(&mut self, side: Side) -> &mut Reserve {
        &mut self.reserves[side as usize]
    }

    #[must_use]
    pub const fn turn(&self) -> Side {
        self.turn
    }

    #[must_use]
    pub const fn turn_moves(&self) -> i8 {
        self.turn_moves
    }

    #[must_use]
    pub const fn turn_auto_moves(&self) -> i8 {
        self.turn_auto_moves
    }

    #[must_use]
    pub const fn turn_pieces(&self) -> Mask {
        self.turn_pieces
    }

    #[must_use]
    pub const fn free_capture(&self) -> &FreeCaptureSnapshot {
        &self.free_capture
    }

    #[must_use]
    pub const fn did_offer_draw(&self) -> bool {
        self.did_offer_draw
    }

    #[must_use]
    pub const fn did_accept_draw(&self) -> bool {
        self.did_accept_draw
    }

    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[must_use]
    /// The three orientation bit-planes, raw, for the binary snapshot writer.
    pub const fn orientation_bit_planes(&self) -> (Mask, Mask, Mask) {
        (self.orientation_bit0, self.orientation_bit1, self.orientation_bit2)
    }

    #[must_use]
    /// A convenience wrapper over the move generator, for callers (notation
    /// parsers, agents) holding a candidate move from outside the engine.
    pub fn is_legal(&self, m: &Move) -> bool {
        movegen::generate_legal_moves(self).contains(m)
    }

    // -- mutation primitives -----------------------------------------

    /// Place `piece` on `sq`. `sq` must be empty.
    pub fn place_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(!self.occupied.contains(sq), "square {sq} already occupied");
        *self.piece_mask_mut(piece.piece_type) |= Mask::from_square(sq);
        self.occupied |= Mask::from_square(sq);
        self.occupied_co[piece.side.index()] |= Mask::from_square(sq);

        if piece.piece_type.is_artillery() {
            let orientation = piece.orientation.unwrap_or(piece.side.forward());
            self.write_orientation(sq, orientation);
            self.recompute_bombarded(piece.side);
        }
        if piece.piece_type.is_infantry() {
            self.recompute_adjacency(piece.side);
        }
    }

    /// Remove and return whatever piece sits on `sq`.
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let pt = self.piece_type_at(sq)?;
        let side = self.side_at(sq)?;
        let orientation = self.orientation_at(sq);

        *self.piece_mask_mut(pt) &= !Mask::from_square(sq);
        self.occupied &= !Mask::from_square(sq);
        self.occupied_co[side.index()] &= !Mask::from_square(sq);
        if pt.is_artillery() {
            self.clear_orientation(sq);
            self.recompute_bombarded(side);
        }
        if pt.is_infantry() {
            self.recompute_adjacency(side);
        }
        Some(Piece::new(pt, side, orientation))
    }

    /// Change the facing of the artillery at `sq`.
    pub fn set_orientation(&mut self, sq: Square, orientation: Orientation) {
        debug_assert!(self.artillery_mask().contains(sq), "no artillery at {sq}");
        self.write_orientation(sq, orientation);
        if let Some(side) = self.side_at(sq) {
            self.recompute_bombarded(side);
        }
    }

    fn write_orientation(&mut self, sq: Square, orientation: Orientation) {
        self.clear_orientation(sq);
        let idx = orientation.index();
        if idx & 1 != 0 {
            self.orientation_bit0 |= Mask::from_square(sq);
        }
        if idx & 2 != 0 {
            self.orientation_bit1 |= Mask::from_square(sq);
        }
        if idx & 4 != 0 {
            self.orientation_bit2 |= Mask::from_square(sq);
        }
    }

    fn clear_orientation(&mut self, sq: Square) {
        self.orientation_bit0 &= !Mask::from_square(sq);
        self.orientation_bit1 &= !Mask::from_square(sq);
        self.orientation_bit2 &= !Mask::from_square(sq);
    }

    fn recompute_bombarded(&mut self, side: Side) {
        let mut bombarded = Mask::EMPTY;
        for sq in (self.artillery_mask() & self.occupied_co[side.index()]).iter() {
            let pt = self.piece_type_at(sq).expect("artillery mask square must have a piece");
            let orientation = self.orientation_at(sq).expect("artillery square must carry an orientation");
            let (_, covered) = bombardment::covered_squares(sq, orientation, pt);
            bombarded |= covered;
        }
        self.bombarded_co[side.index()] = bombarded;
    }

    fn recompute_adjacency(&mut self, side: Side) {
        let mut adjacency = Mask::EMPTY;
        for sq in (self.infantry_mask() & self.occupied_co[side.index()]).iter() {
            adjacency |= TABLES.adjacent(sq);
        }
        self.adjacent_infantry_squares_co[side.index()] = adjacency;
    }

    #[cfg(test)]
    pub(crate) fn force_turn(&mut self, side: Side) {
        self.turn = side;
    }

    // -- turn-scratch management (used by `apply::push`) --------------

    pub(super) fn push_history(&mut self, m: Move) {
        self.history.push(m);
    }

    pub(super) fn set_offer_draw(&mut self, offer: bool) {
        self.did_offer_draw = offer;
    }

    pub(super) fn set_accept_draw(&mut self, accept: bool) {
        self.did_accept_draw = accept;
    }

    pub(super) fn mark_turn_piece(&mut self, sq: Square) {
        self.turn_pieces |= Mask::from_square(sq);
    }

    pub(super) fn increment_turn_moves(&mut self) {
        self.turn_moves += 1;
    }

    pub(super) fn increment_turn_auto_moves(&mut self) {
        self.turn_auto_moves += 1;
    }

    pub(super) fn consume_free_capture_allowance(&mut self, sq: Square) {
        self.free_capture.capturable_enemies &= !Mask::from_square(sq);

        let containing_cluster = clusters::find_clusters(self.free_capture.clusters, |s| TABLES.adjacent(s))
            .into_iter()
            .find(|cluster| cluster.contains(sq));
        if let Some(cluster) = containing_cluster {
            if let Some(spent) = (self.free_capture.allowance & cluster).msb() {
                self.free_capture.allowance.remove(spent);
            }
        }

        if self.free_capture.allowance.is_empty() {
            self.free_capture = FreeCaptureSnapshot::EMPTY;
        }
    }

    /// Flip the side to move and reset all per-turn scratch state,
    /// including recomputing the free-capture snapshot for the new side.
    pub(super) fn flip_side_and_reset_turn(&mut self) {
        self.turn = self.turn.other();
        self.turn_moves = 0;
        self.turn_auto_moves = 0;
        self.turn_pieces = Mask::EMPTY;
        self.refresh_free_capture_snapshot();
    }

    /// Recompute the free-capture snapshot for the side currently to move
    /// (called on side-flip, and once at construction).
    pub(super) fn refresh_free_capture_snapshot(&mut self) {
        self.free_capture = movegen::compute_free_capture_snapshot(self, self.turn, None, None);
    }

    // -- geometric transforms ---------------------------------------

    #[must_use]
    /// Rebuild the board from a per-square remapping of occupied squares,
    /// an orientation remap, and optionally flipping which side owns each
    /// piece. Reserves and the side to move are carried over unchanged;
    /// callers that need to swap them (as `mirror` does) do so afterward.
    fn remap(&self, square_of: impl Fn(Square) -> Square, orient_of: impl Fn(Orientation) -> Orientation, flip_owner: bool) -> Board {
        let mut out = Board::empty();
        out.reserves = self.reserves;
        out.turn = self.turn;
        out.did_offer_draw = self.did_offer_draw;
        out.did_accept_draw = self.did_accept_draw;
        for sq in ALL_SQUARES {
            if let Some(piece) = self.piece_at(sq) {
                let dest = square_of(sq);
                let side = if flip_owner { piece.side.other() } else { piece.side };
                let orientation = piece.orientation.map(&orient_of);
                out.place_piece(dest, Piece::new(piece.piece_type, side, orientation));
            }
        }
        out
    }

    #[must_use]
    /// Reflect the board across the horizontal midline (ranks flip).
    pub fn flip_vertical(&self) -> Board {
        self.remap(
            |sq| Square::new(7 - sq.rank(), sq.file()).unwrap(),
            |o| Orientation::from_index((4 + 8 - o.index() % 8) % 8).unwrap(),
            false,
        )
    }

    #[must_use]
    /// Reflect the board across the vertical midline (files flip).
    pub fn flip_horizontal(&self) -> Board {
        self.remap(
            |sq| Square::new(sq.rank(), 7 - sq.file()).unwrap(),
            |o| Orientation::from_index((8 - o.index()) % 8).unwrap(),
            false,
        )
    }

    #[must_use]
    /// The Testable-Property-7 transform: point-reflect every square,
    /// reverse every facing, swap which side owns each piece, swap the two
    /// reserves, and flip the side to move. The result's legal-move set is
    /// isomorphic (under the same transform) to the original's.
    pub fn mirror(&self) -> Board {
        let mut out = self.remap(
            |sq| Square::new(7 - sq.rank(), 7 - sq.file()).unwrap(),
            |o| Orientation::from_index((o.index() + 4) % 8).unwrap(),
            true,
        );
        out.reserves = [self.reserves[1], self.reserves[0]];
        out.turn = self.turn.other();
        out.refresh_free_capture_snapshot();
        out
    }

    #[must_use]
    /// Rotate the board 90 degrees clockwise, using the orientation
    /// bit-plane identity from Design Note 3: `(b0, NOT b1, b2 XOR b1)`
    /// applied after spatially rotating each mask.
    pub fn rotate_90_clockwise(&self) -> Board {
        let rotate = |m: Mask| m.rotate_90();
        let mut out = Board {
            occupied: rotate(self.occupied),
            infantry: rotate(self.infantry),
            armored_infantry: rotate(self.armored_infantry),
            airborne: rotate(self.airborne),
            artillery: rotate(self.artillery),
            armored_artillery: rotate(self.armored_artillery),
            heavy: rotate(self.heavy),
            hq: rotate(self.hq),
            occupied_co: [rotate(self.occupied_co[0]), rotate(self.occupied_co[1])],
            bombarded_co: [Mask::EMPTY; 2],
            adjacent_infantry_squares_co: [Mask::EMPTY; 2],
            orientation_bit0: Mask::EMPTY,
            orientation_bit1: Mask::EMPTY,
            orientation_bit2: Mask::EMPTY,
            reserves: self.reserves,
            turn: self.turn,
            turn_moves: self.turn_moves,
            turn_auto_moves: self.turn_auto_moves,
            turn_pieces: rotate(self.turn_pieces),
            free_capture: FreeCaptureSnapshot::EMPTY,
            history: self.history.clone(),
            did_offer_draw: self.did_offer_draw,
            did_accept_draw: self.did_accept_draw,
        };
        let new_artillery_mask = Mask::new(out.artillery.0 | out.armored_artillery.0 | out.heavy.0);
        let rb0 = rotate(self.orientation_bit0);
        let rb1 = rotate(self.orientation_bit1);
        let rb2 = rotate(self.orientation_bit2);
        out.orientation_bit0 = rb0 & new_artillery_mask;
        out.orientation_bit1 = (!rb1) & new_artillery_mask;
        out.orientation_bit2 = (rb2 ^ rb1) & new_artillery_mask;
        out.recompute_bombarded(super::piece::Side::Red);
        out.recompute_bombarded(super::piece::Side::Blue);
        out.recompute_adjacency(super::piece::Side::Red);
        out.recompute_adjacency(super::piece::Side::Blue);
        out.refresh_free_capture_snapshot();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_both_hqs() {
        let b = Board::starting_position();
        assert!(b.hq_square(Side::Red).is_some());
        assert!(b.hq_square(Side::Blue).is_some());
        assert_eq!(b.turn(), Side::Red);
    }

    #[test]
    fn place_and_remove_round_trip() {
        let mut b = Board::empty();
        let sq = Square::new(3, 3).unwrap();
        b.place_piece(sq, Piece::new(PieceType::Infantry, Side::Red, None));
        assert_eq!(b.piece_type_at(sq), Some(PieceType::Infantry));
        assert!(b.adjacent_to_infantry(Side::Red).contains(Square::new(3, 4).unwrap()));
        let removed = b.remove_piece(sq).unwrap();
        assert_eq!(removed.piece_type, PieceType::Infantry);
        assert!(b.occupied().is_empty());
        assert!(b.adjacent_to_infantry(Side::Red).is_empty());
    }

    #[test]
    fn artillery_bombardment_recomputed_on_place() {
        let mut b = Board::empty();
        let sq = Square::new(3, 3).unwrap();
        b.place_piece(sq, Piece::new(PieceType::Artillery, Side::Red, Some(Orientation::North)));
        assert!(b.bombarded_by(Side::Red).contains(Square::new(5, 3).unwrap()));
    }

    #[test]
    fn flip_vertical_moves_red_back_rank_pieces_to_rank_7() {
        let b = Board::starting_position();
        let flipped = b.flip_vertical();
        assert!(flipped.hq_square(Side::Red).unwrap().rank() == 7);
    }

    #[test]
    fn mirror_swaps_reserves_and_turn() {
        let mut b = Board::starting_position();
        b.reserve_mut(Side::Red).remove(PieceType::Infantry, 1).unwrap();
        let mirrored = b.mirror();
        assert_eq!(mirrored.turn(), Side::Blue);
        assert_eq!(mirrored.reserve(Side::Blue).count(PieceType::Infantry), 4);
    }

    #[test]
    fn rotate_90_preserves_piece_count() {
        let b = Board::starting_position();
        let rotated = b.rotate_90_clockwise();
        assert_eq!(rotated.occupied().len(), b.occupied().len());
    }
}
