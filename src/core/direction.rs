//! Compass orientations, used by artillery facing and bombardment geometry.

use crate::error::GhqError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
/// One of the eight compass directions an artillery piece can face.
///
/// The ordering (N, NE, E, SE, S, SW, W, NW) matches the bit encoding used
/// by the three orientation bit-planes in [`crate::core::board::Board`]: the
/// raw value is `bit2 << 2 | bit1 << 1 | bit0`.
pub enum Orientation {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Orientation {
    /// All eight orientations, in raw-value order.
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::NorthEast,
        Orientation::East,
        Orientation::SouthEast,
        Orientation::South,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
    ];

    #[must_use]
    /// This orientation's raw value, `0..8`.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Build an orientation from a raw value `0..8`.
    pub fn from_index(value: u8) -> Result<Orientation, GhqError> {
        match value {
            0 => Ok(Orientation::North),
            1 => Ok(Orientation::NorthEast),
            2 => Ok(Orientation::East),
            3 => Ok(Orientation::SouthEast),
            4 => Ok(Orientation::South),
            5 => Ok(Orientation::SouthWest),
            6 => Ok(Orientation::West),
            7 => Ok(Orientation::NorthWest),
            _ => Err(GhqError::OutOfBounds("orientation must be in 0..8")),
        }
    }

    #[must_use]
    /// Whether this orientation points along a file or rank (as opposed to a
    /// diagonal).
    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Orientation::North | Orientation::East | Orientation::South | Orientation::West
        )
    }

    #[must_use]
    /// The (file, rank) unit step in this direction, as signed deltas.
    pub const fn step(self) -> (i8, i8) {
        match self {
            Orientation::North => (0, 1),
            Orientation::NorthEast => (1, 1),
            Orientation::East => (1, 0),
            Orientation::SouthEast => (1, -1),
            Orientation::South => (0, -1),
            Orientation::SouthWest => (-1, -1),
            Orientation::West => (-1, 0),
            Orientation::NorthWest => (-1, 1),
        }
    }

    #[must_use]
    /// The cardinal arrow glyph for this orientation, used by the text
    /// notation (`↑ ↗ → ↘ ↓ ↙ ← ↖`).
    pub const fn arrow(self) -> char {
        match self {
            Orientation::North => '↑',
            Orientation::NorthEast => '↗',
            Orientation::East => '→',
            Orientation::SouthEast => '↘',
            Orientation::South => '↓',
            Orientation::SouthWest => '↙',
            Orientation::West => '←',
            Orientation::NorthWest => '↖',
        }
    }

    /// Parse a cardinal arrow glyph back into an orientation.
    pub fn from_arrow(c: char) -> Result<Orientation, GhqError> {
        Orientation::ALL
            .into_iter()
            .find(|o| o.arrow() == c)
            .ok_or_else(|| GhqError::ParseError(format!("not an orientation arrow: {c:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_round_trip() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_arrow(o.arrow()).unwrap(), o);
        }
    }

    #[test]
    fn index_round_trip() {
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_index(o.index()).unwrap(), o);
        }
    }
}
