//! A side's fleet of undeployed units.

use crate::error::GhqError;

use super::piece::PieceType;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
/// A per-side multiset of undeployed units. HQ is never held in reserve.
pub struct Reserve {
    counts: [u32; 6],
}

fn slot(pt: PieceType) -> usize {
    PieceType::RESERVABLE
        .iter()
        .position(|&r| r == pt)
        .expect("reserve queried with a non-reservable piece type")
}

impl Reserve {
    #[must_use]
    pub fn new() -> Reserve {
        Reserve::default()
    }

    #[must_use]
    /// The count of `pt` held in this reserve. Always `0` for `PieceType::Hq`.
    pub fn count(&self, pt: PieceType) -> u32 {
        if pt == PieceType::Hq {
            return 0;
        }
        self.counts[slot(pt)]
    }

    /// Add `n` units of `pt` to this reserve.
    pub fn add(&mut self, pt: PieceType, n: u32) {
        if pt == PieceType::Hq {
            return;
        }
        self.counts[slot(pt)] += n;
    }

    /// Remove `n` units of `pt` from this reserve.
    ///
    /// # Errors
    /// Returns [`GhqError::OutOfReserve`] if fewer than `n` units of `pt`
    /// are present.
    pub fn remove(&mut self, pt: PieceType, n: u32) -> Result<(), GhqError> {
        let idx = slot(pt);
        if self.counts[idx] < n {
            return Err(GhqError::OutOfReserve(pt));
        }
        self.counts[idx] -= n;
        Ok(())
    }

    #[must_use]
    /// Iterate over the piece types with non-zero count, in
    /// [`PieceType::RESERVABLE`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceType, u32)> + '_ {
        PieceType::RESERVABLE
            .into_iter()
            .filter(move |&pt| self.count(pt) > 0)
            .map(move |pt| (pt, self.count(pt)))
    }

    #[must_use]
    /// The six reserve counts in the fixed order used by the binary
    /// snapshot and FEN reserve string: infantry, armoured infantry,
    /// airborne, artillery, armoured artillery, heavy artillery.
    pub fn to_counts(&self) -> [u32; 6] {
        self.counts
    }

    #[must_use]
    /// Build a reserve from the six counts in [`Reserve::to_counts`] order.
    pub fn from_counts(counts: [u32; 6]) -> Reserve {
        Reserve { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove() {
        let mut r = Reserve::new();
        r.add(PieceType::Infantry, 3);
        assert_eq!(r.count(PieceType::Infantry), 3);
        r.remove(PieceType::Infantry, 2).unwrap();
        assert_eq!(r.count(PieceType::Infantry), 1);
    }

    #[test]
    fn remove_too_many_fails() {
        let mut r = Reserve::new();
        r.add(PieceType::Artillery, 1);
        assert!(r.remove(PieceType::Artillery, 2).is_err());
    }

    #[test]
    fn hq_never_reserved() {
        let mut r = Reserve::new();
        r.add(PieceType::Hq, 5);
        assert_eq!(r.count(PieceType::Hq), 0);
    }
}
