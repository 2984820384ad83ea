//! Precomputed per-square lookup tables.
//!
//! Built once, lazily, at first use — no build-time magic-number search
//! is needed here, since the occupancy subsets involved are tiny and a
//! direct carry-rippler enumeration is cheap enough to do on demand.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::bitboard::Mask;
use super::square::{Square, ALL_SQUARES};

/// One-step king-neighbour deltas (index deltas into the 64-square board).
const KING_DELTAS: [i32; 8] = [9, 8, 7, 1, -9, -8, -7, -1];
/// Two-step straight-line deltas (one of the eight directions, doubled).
const DOUBLE_DELTAS: [i32; 8] = [18, 16, 14, 2, -18, -16, -14, -2];
/// Orthogonal one-step deltas.
const ADJACENT_DELTAS: [i32; 4] = [8, 1, -8, -1];

const RANK_DELTAS: [i32; 2] = [-1, 1];
const FILE_DELTAS: [i32; 2] = [-8, 8];
const DIAG_DELTAS: [i32; 4] = [-9, -7, 7, 9];

/// One step of `delta` from `sq`, or `None` if it would fall off the board or
/// wrap around an edge.
fn step_once(sq: Square, delta: i32) -> Option<Square> {
    let next = sq.index() as i32 + delta;
    if !(0..64).contains(&next) {
        return None;
    }
    let next = Square::new_unchecked(next as u8);
    if sq.chebyshev_to(next) > 2 {
        return None;
    }
    Some(next)
}

/// Squares reachable from `sq` by taking exactly one `delta` hop, for each
/// delta in `deltas`, ignoring all other squares (used for fixed-pattern
/// tables: king steps, double steps, orthogonal adjacency).
fn hop_pattern(sq: Square, deltas: &[i32]) -> Mask {
    let mut m = Mask::EMPTY;
    for &d in deltas {
        if let Some(dest) = step_once(sq, d) {
            m.insert(dest);
        }
    }
    m
}

/// Walk outward from `sq` along each delta in `deltas` until the board edge
/// or an occupied square (inclusive of that square), the standard sliding
/// attack computation.
fn sliding_ray(sq: Square, occupied: Mask, deltas: &[i32]) -> Mask {
    let mut attacks = Mask::EMPTY;
    for &d in deltas {
        let mut cur = sq;
        loop {
            match step_once(cur, d) {
                Some(next) => {
                    attacks.insert(next);
                    if occupied.contains(next) {
                        break;
                    }
                    cur = next;
                }
                None => break,
            }
        }
    }
    attacks
}

/// The squares on `sq`'s rank/file edges that are not on `sq`'s own rank or
/// file — excluded from a sliding mask's "interior" occupancy-relevant set,
/// since a blocker on the edge can never be jumped past regardless.
fn edges(sq: Square) -> Mask {
    let rank_edges = (Mask::RANK_0 | Mask::RANK_7) & !rank_mask(sq.rank());
    let file_edges = (Mask::FILE_A | Mask::FILE_H) & !file_mask(sq.file());
    rank_edges | file_edges
}

fn rank_mask(rank: usize) -> Mask {
    Mask::new(0xFFu64 << (8 * rank))
}

fn file_mask(file: usize) -> Mask {
    Mask::new(Mask::FILE_A.0 << file)
}

/// Iterate the subsets of `mask`, including the empty set, via the standard
/// carry-rippler trick.
fn carry_rippler(mask: Mask) -> impl Iterator<Item = Mask> {
    let mut subset = 0u64;
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let current = Mask::new(subset);
        subset = subset.wrapping_sub(mask.0) & mask.0;
        if subset == 0 {
            done = true;
        }
        Some(current)
    })
}

/// A occupancy-indexed sliding table for one axis (rank, file, or
/// diagonal), one entry per square.
struct RayTable {
    mask: [Mask; 64],
    attacks: Vec<HashMap<u64, Mask>>,
}

impl RayTable {
    fn build(deltas: &[i32]) -> RayTable {
        let mut mask = [Mask::EMPTY; 64];
        let mut attacks = Vec::with_capacity(64);
        for &sq in &ALL_SQUARES {
            let interior = sliding_ray(sq, Mask::EMPTY, deltas) & !edges(sq);
            mask[sq.index() as usize] = interior;
            let mut table = HashMap::new();
            for subset in carry_rippler(interior) {
                table.insert(subset.0, sliding_ray(sq, subset, deltas));
            }
            attacks.push(table);
        }
        RayTable { mask, attacks }
    }

    fn attacks(&self, sq: Square, occupied: Mask) -> Mask {
        let relevant = occupied & self.mask[sq.index() as usize];
        self.attacks[sq.index() as usize]
            .get(&relevant.0)
            .copied()
            .unwrap_or(Mask::EMPTY)
    }
}

/// All precomputed per-square geometry used by movement and bombardment.
pub struct Tables {
    adjacent: [Mask; 64],
    regular_moves: [Mask; 64],
    armored_reach: [Mask; 64],
    rank: RayTable,
    file: RayTable,
    diag: RayTable,
}

impl Tables {
    fn build() -> Tables {
        let mut adjacent = [Mask::EMPTY; 64];
        let mut regular_moves = [Mask::EMPTY; 64];
        let mut armored_reach = [Mask::EMPTY; 64];
        for &sq in &ALL_SQUARES {
            let i = sq.index() as usize;
            adjacent[i] = hop_pattern(sq, &ADJACENT_DELTAS);
            regular_moves[i] = hop_pattern(sq, &KING_DELTAS);
            armored_reach[i] = hop_pattern(sq, &KING_DELTAS) | hop_pattern(sq, &DOUBLE_DELTAS);
        }
        Tables {
            adjacent,
            regular_moves,
            armored_reach,
            rank: RayTable::build(&RANK_DELTAS),
            file: RayTable::build(&FILE_DELTAS),
            diag: RayTable::build(&DIAG_DELTAS),
        }
    }

    #[must_use]
    /// The four orthogonal neighbours of `sq`.
    pub fn adjacent(&self, sq: Square) -> Mask {
        self.adjacent[sq.index() as usize]
    }

    #[must_use]
    /// The eight one-step king-like neighbours of `sq`.
    pub fn regular_moves(&self, sq: Square) -> Mask {
        self.regular_moves[sq.index() as usize]
    }

    #[must_use]
    /// The squares an armored piece at `sq` could move to if the board were
    /// otherwise empty: one or two steps in each of the eight directions,
    /// never a non-straight hop.
    pub fn armored_reach(&self, sq: Square) -> Mask {
        self.armored_reach[sq.index() as usize]
    }

    #[must_use]
    /// The one-or-two-step armored move mask from `sq` given the actual
    /// board `occupied` mask: a piece may not jump over an occupied square.
    pub fn armored_moves(&self, sq: Square, occupied: Mask) -> Mask {
        let slide = self.rank.attacks(sq, occupied)
            | self.file.attacks(sq, occupied)
            | self.diag.attacks(sq, occupied);
        self.armored_reach(sq) & slide
    }

    #[must_use]
    /// The squares on the straight line between `a` and `b`, inclusive of
    /// `b` but not `a`, if `a` and `b` share a rank, file, or diagonal.
    /// Returns `Mask::EMPTY` if they do not (used for bombardment's covered
    /// segment).
    pub fn ray_between_inclusive_end(&self, a: Square, b: Square) -> Mask {
        if a == b {
            return Mask::EMPTY;
        }
        for deltas in [&RANK_DELTAS[..], &FILE_DELTAS[..], &DIAG_DELTAS[..]] {
            let towards_b = sliding_ray(a, Mask::from_square(b), deltas);
            if towards_b.contains(b) {
                return towards_b;
            }
        }
        Mask::EMPTY
    }
}

/// Global, lazily-initialized table set.
pub static TABLES: Lazy<Tables> = Lazy::new(Tables::build);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_corner_has_two_neighbours() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(TABLES.adjacent(a1).len(), 2);
    }

    #[test]
    fn regular_moves_center_has_eight_neighbours() {
        let d4 = Square::new(3, 3).unwrap();
        assert_eq!(TABLES.regular_moves(d4).len(), 8);
    }

    #[test]
    fn armored_blocked_by_occupied_midpoint() {
        let d2 = Square::new(1, 3).unwrap();
        let d3 = Square::new(2, 3).unwrap();
        let d4 = Square::new(3, 3).unwrap();
        let occupied = Mask::from_square(d2) | Mask::from_square(d3);
        let moves = TABLES.armored_moves(d2, occupied);
        // d2 can reach d3 (capture-adjacent) but not jump past it to d4.
        assert!(moves.contains(d3));
        assert!(!moves.contains(d4));
    }

    #[test]
    fn armored_unblocked_reaches_two_squares() {
        let d2 = Square::new(1, 3).unwrap();
        let d4 = Square::new(3, 3).unwrap();
        let occupied = Mask::from_square(d2);
        let moves = TABLES.armored_moves(d2, occupied);
        assert!(moves.contains(d4));
    }
}
