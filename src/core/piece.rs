//! Pieces, sides, and the pieces-and-reserve model.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::GhqError;

use super::direction::Orientation;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
/// One of the two sides.
///
/// Red moves first, and occupies rank 0 at the start of the game; blue
/// occupies rank 7.
pub enum Side {
    Red = 0,
    Blue = 1,
}

impl Side {
    #[must_use]
    /// The other side.
    pub const fn other(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    #[must_use]
    /// This side's back rank, `0` for red and `7` for blue.
    pub const fn back_rank(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Blue => 7,
        }
    }

    #[must_use]
    /// The orientation a freshly reinforced artillery piece faces: north for
    /// red, south for blue.
    pub const fn forward(self) -> Orientation {
        match self {
            Side::Red => Orientation::North,
            Side::Blue => Orientation::South,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
/// The type of a piece. This carries no information about color, square, or
/// (for artillery) orientation.
pub enum PieceType {
    Hq = 0,
    Infantry,
    ArmoredInfantry,
    AirborneInfantry,
    Artillery,
    ArmoredArtillery,
    HeavyArtillery,
}

impl PieceType {
    /// Every piece type, in FEN/reserve order.
    pub const ALL: [PieceType; 7] = [
        PieceType::Hq,
        PieceType::Infantry,
        PieceType::ArmoredInfantry,
        PieceType::AirborneInfantry,
        PieceType::Artillery,
        PieceType::ArmoredArtillery,
        PieceType::HeavyArtillery,
    ];

    /// Every piece type that can sit in a reserve (everything but HQ).
    pub const RESERVABLE: [PieceType; 6] = [
        PieceType::Infantry,
        PieceType::ArmoredInfantry,
        PieceType::AirborneInfantry,
        PieceType::Artillery,
        PieceType::ArmoredArtillery,
        PieceType::HeavyArtillery,
    ];

    #[must_use]
    /// Whether this piece type is one of the three artillery variants.
    pub const fn is_artillery(self) -> bool {
        matches!(
            self,
            PieceType::Artillery | PieceType::ArmoredArtillery | PieceType::HeavyArtillery
        )
    }

    #[must_use]
    /// Whether this piece type is one of the three infantry variants.
    pub const fn is_infantry(self) -> bool {
        matches!(
            self,
            PieceType::Infantry | PieceType::ArmoredInfantry | PieceType::AirborneInfantry
        )
    }

    #[must_use]
    /// Whether this piece is armored (moves one or two steps, non-jumping).
    pub const fn is_armored(self) -> bool {
        matches!(self, PieceType::ArmoredInfantry | PieceType::ArmoredArtillery)
    }

    #[must_use]
    /// The bombardment range for artillery: 3 for heavy artillery, 2
    /// otherwise. Meaningless for non-artillery.
    pub const fn bombardment_range(self) -> u8 {
        if matches!(self, PieceType::HeavyArtillery) {
            3
        } else {
            2
        }
    }

    #[must_use]
    /// The uppercase FEN letter for this piece type.
    pub const fn letter(self) -> char {
        match self {
            PieceType::Hq => 'Q',
            PieceType::Infantry => 'I',
            PieceType::ArmoredInfantry => 'F',
            PieceType::AirborneInfantry => 'P',
            PieceType::Artillery => 'R',
            PieceType::ArmoredArtillery => 'T',
            PieceType::HeavyArtillery => 'H',
        }
    }

    /// Parse an uppercase FEN letter back into a piece type.
    pub fn from_letter(c: char) -> Result<PieceType, GhqError> {
        PieceType::ALL
            .into_iter()
            .find(|pt| pt.letter() == c.to_ascii_uppercase())
            .ok_or_else(|| GhqError::ParseError(format!("not a piece letter: {c:?}")))
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:?}", self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// A piece together with its side and (for artillery) its orientation.
pub struct Piece {
    pub piece_type: PieceType,
    pub side: Side,
    pub orientation: Option<Orientation>,
}

impl Piece {
    #[must_use]
    /// Build a piece, deriving whether it carries an orientation from its
    /// type. `orientation` is ignored (set to `None`) for non-artillery.
    pub fn new(piece_type: PieceType, side: Side, orientation: Option<Orientation>) -> Piece {
        Piece {
            piece_type,
            side,
            orientation: if piece_type.is_artillery() { orientation } else { None },
        }
    }

    #[must_use]
    /// The FEN letter for this piece, uppercase for red and lowercase for
    /// blue, optionally followed by an orientation arrow.
    pub fn symbol(self) -> String {
        let letter = self.piece_type.letter();
        let letter = match self.side {
            Side::Red => letter,
            Side::Blue => letter.to_ascii_lowercase(),
        };
        match self.orientation {
            Some(o) => format!("{letter}{}", o.arrow()),
            None => letter.to_string(),
        }
    }
}
