//! Move notation: `skip`, `r<letter><square>[x<square>]`,
//! `<from><to>[x<square>]`, `<from><to>[arrow]`, `sb<square>`, `sf<square>`.

use crate::core::board::Board;
use crate::core::direction::Orientation;
use crate::core::moves::{AutoCaptureKind, Move};
use crate::core::piece::PieceType;
use crate::core::square::Square;
use crate::GhqError;

#[must_use]
/// Print `m` in move notation.
pub fn to_movetext(m: &Move) -> String {
    match m {
        Move::Skip => "skip".to_string(),
        Move::Reinforce { unit_type, to, capture_preference } => {
            format!("r{}{to}{}", unit_type.letter(), capture_suffix(*capture_preference))
        }
        Move::Move { from, to, capture_preference } => {
            format!("{from}{to}{}", capture_suffix(*capture_preference))
        }
        Move::MoveAndOrient { from, to, orientation } => {
            let suffix = orientation.map_or_else(String::new, |o| o.arrow().to_string());
            format!("{from}{to}{suffix}")
        }
        Move::AutoCapture { kind, target } => match kind {
            AutoCaptureKind::Bombard => format!("sb{target}"),
            AutoCaptureKind::Free => format!("sf{target}"),
        },
    }
}

fn capture_suffix(capture_preference: Option<Square>) -> String {
    capture_preference.map_or_else(String::new, |sq| format!("x{sq}"))
}

/// Parse move notation against `board`, which disambiguates a bare
/// `<from><to>` between [`Move::Move`] and [`Move::MoveAndOrient`] by
/// checking whether `from` holds artillery.
pub fn parse_movetext(s: &str, board: &Board) -> Result<Move, GhqError> {
    if s == "skip" {
        return Ok(Move::Skip);
    }
    if let Some(rest) = s.strip_prefix("sb") {
        return Ok(Move::AutoCapture { kind: AutoCaptureKind::Bombard, target: parse_square(rest)? });
    }
    if let Some(rest) = s.strip_prefix("sf") {
        return Ok(Move::AutoCapture { kind: AutoCaptureKind::Free, target: parse_square(rest)? });
    }
    if let Some(rest) = s.strip_prefix('r') {
        let mut chars = rest.chars();
        let letter = chars.next().ok_or_else(|| GhqError::ParseError(format!("truncated reinforce move: {s:?}")))?;
        let unit_type = PieceType::from_letter(letter)?;
        let remainder: String = chars.collect();
        let (to, capture_preference) = split_square_and_capture(&remainder)?;
        return Ok(Move::Reinforce { unit_type, to, capture_preference });
    }

    if s.len() < 4 {
        return Err(GhqError::ParseError(format!("truncated move: {s:?}")));
    }
    let from = parse_square(&s[0..2])?;
    let (to, rest) = split_square_and_rest(&s[2..])?;

    match board.piece_type_at(from) {
        Some(pt) if pt.is_artillery() => {
            let orientation = match rest {
                "" => None,
                arrow => Some(Orientation::from_arrow(
                    arrow.chars().next().expect("non-empty checked above"),
                )?),
            };
            Ok(Move::MoveAndOrient { from, to, orientation })
        }
        _ => {
            let capture_preference = match rest {
                "" => None,
                suffix => Some(parse_square(
                    suffix.strip_prefix('x').ok_or_else(|| GhqError::ParseError(format!("invalid move suffix: {suffix:?}")))?,
                )?),
            };
            Ok(Move::Move { from, to, capture_preference })
        }
    }
}

fn parse_square(s: &str) -> Result<Square, GhqError> {
    Square::from_algebraic(s)
}

fn split_square_and_rest(s: &str) -> Result<(Square, &str), GhqError> {
    if s.len() < 2 {
        return Err(GhqError::ParseError(format!("truncated square: {s:?}")));
    }
    let (square_str, rest) = s.split_at(2);
    Ok((parse_square(square_str)?, rest))
}

fn split_square_and_capture(s: &str) -> Result<(Square, Option<Square>), GhqError> {
    let (to, rest) = split_square_and_rest(s)?;
    let capture_preference = match rest {
        "" => None,
        suffix => Some(parse_square(
            suffix.strip_prefix('x').ok_or_else(|| GhqError::ParseError(format!("invalid reinforce suffix: {suffix:?}")))?,
        )?),
    };
    Ok((to, capture_preference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_round_trips() {
        let board = Board::starting_position();
        assert_eq!(to_movetext(&Move::Skip), "skip");
        assert_eq!(parse_movetext("skip", &board).unwrap(), Move::Skip);
    }

    #[test]
    fn plain_move_round_trips() {
        let board = Board::starting_position();
        let m = Move::Move {
            from: Square::from_algebraic("f2").unwrap(),
            to: Square::from_algebraic("f3").unwrap(),
            capture_preference: None,
        };
        let text = to_movetext(&m);
        assert_eq!(text, "f2f3");
        assert_eq!(parse_movetext(&text, &board).unwrap(), m);
    }

    #[test]
    fn move_and_orient_round_trips() {
        let board = Board::starting_position();
        let m = Move::MoveAndOrient {
            from: Square::from_algebraic("g1").unwrap(),
            to: Square::from_algebraic("g1").unwrap(),
            orientation: Some(Orientation::East),
        };
        let text = to_movetext(&m);
        assert_eq!(text, "g1g1→");
        assert_eq!(parse_movetext(&text, &board).unwrap(), m);
    }

    #[test]
    fn reinforce_with_capture_round_trips() {
        let board = Board::starting_position();
        let m = Move::Reinforce {
            unit_type: PieceType::Infantry,
            to: Square::from_algebraic("h1").unwrap(),
            capture_preference: Some(Square::from_algebraic("h2").unwrap()),
        };
        let text = to_movetext(&m);
        assert_eq!(text, "rIh1xh2");
        assert_eq!(parse_movetext(&text, &board).unwrap(), m);
    }

    #[test]
    fn auto_capture_round_trips() {
        let board = Board::starting_position();
        let m = Move::AutoCapture { kind: AutoCaptureKind::Free, target: Square::from_algebraic("d5").unwrap() };
        let text = to_movetext(&m);
        assert_eq!(text, "sfd5");
        assert_eq!(parse_movetext(&text, &board).unwrap(), m);
    }
}
