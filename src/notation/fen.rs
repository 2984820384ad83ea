//! The textual position format: `<board> <red_reserve>
//! <blue_reserve> <turn>`.

use crate::core::board::Board;
use crate::core::direction::Orientation;
use crate::core::piece::{Piece, PieceType, Side};
use crate::core::reserve::Reserve;
use crate::core::square::Square;
use crate::GhqError;

#[must_use]
/// Print `board` in the textual position format.
pub fn to_fen(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(8);
    for rank in (0..8).rev() {
        let mut row = String::new();
        let mut empty_run = 0u32;
        for file in 0..8 {
            let sq = Square::new(rank, file).expect("rank/file in 0..8");
            match board.piece_at(sq) {
                Some(piece) => {
                    if empty_run > 0 {
                        row.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    row.push_str(&piece.symbol());
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            row.push_str(&empty_run.to_string());
        }
        ranks.push(row);
    }
    let board_field = ranks.join("/");

    let red_reserve = reserve_field(board.reserve(Side::Red), Side::Red);
    let blue_reserve = reserve_field(board.reserve(Side::Blue), Side::Blue);
    let turn_field = match board.turn() {
        Side::Red => 'r',
        Side::Blue => 'b',
    };

    format!("{board_field} {red_reserve} {blue_reserve} {turn_field}")
}

fn reserve_field(reserve: &Reserve, side: Side) -> String {
    let mut s = String::new();
    for (pt, count) in reserve.iter() {
        let letter = match side {
            Side::Red => pt.letter(),
            Side::Blue => pt.letter().to_ascii_lowercase(),
        };
        for _ in 0..count {
            s.push(letter);
        }
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}

/// Parse a board from the textual position format.
pub fn from_fen(s: &str) -> Result<Board, GhqError> {
    let mut fields = s.split_whitespace();
    let board_field = fields
        .next()
        .ok_or_else(|| GhqError::ParseError("missing board field".to_string()))?;
    let red_reserve_field = fields
        .next()
        .ok_or_else(|| GhqError::ParseError("missing red reserve field".to_string()))?;
    let blue_reserve_field = fields
        .next()
        .ok_or_else(|| GhqError::ParseError("missing blue reserve field".to_string()))?;
    let turn_field = fields
        .next()
        .ok_or_else(|| GhqError::ParseError("missing turn field".to_string()))?;
    if fields.next().is_some() {
        return Err(GhqError::ParseError(format!("trailing fields in FEN: {s:?}")));
    }

    let pieces = parse_board_field(board_field)?;
    let reserves = [
        parse_reserve_field(red_reserve_field)?,
        parse_reserve_field(blue_reserve_field)?,
    ];
    let turn = match turn_field {
        "r" => Side::Red,
        "b" => Side::Blue,
        other => return Err(GhqError::ParseError(format!("invalid turn field: {other:?}"))),
    };

    Ok(Board::from_parts(&pieces, reserves, turn))
}

fn parse_board_field(field: &str) -> Result<Vec<(Square, Piece)>, GhqError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(GhqError::ParseError(format!("expected 8 ranks, got {}", rows.len())));
    }

    let mut pieces = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let rank = 7 - row_idx;
        let mut file = 0usize;
        let mut chars = row.chars().peekable();
        while let Some(c) = chars.next() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            if file >= 8 {
                return Err(GhqError::ParseError(format!("rank {row:?} overflows the board")));
            }
            let side = if c.is_uppercase() { Side::Red } else { Side::Blue };
            let piece_type = PieceType::from_letter(c)?;
            let orientation = if piece_type.is_artillery() {
                let arrow = chars
                    .next()
                    .ok_or_else(|| GhqError::ParseError(format!("artillery letter {c:?} missing orientation arrow")))?;
                Some(Orientation::from_arrow(arrow)?)
            } else {
                None
            };
            let sq = Square::new(rank, file).ok_or(GhqError::OutOfBounds("square index must be in 0..64"))?;
            pieces.push((sq, Piece::new(piece_type, side, orientation)));
            file += 1;
        }
        if file != 8 {
            return Err(GhqError::ParseError(format!("rank {row:?} does not cover all 8 files")));
        }
    }
    Ok(pieces)
}

fn parse_reserve_field(field: &str) -> Result<Reserve, GhqError> {
    let mut reserve = Reserve::new();
    if field == "-" {
        return Ok(reserve);
    }
    for c in field.chars() {
        let pt = PieceType::from_letter(c)?;
        if pt == PieceType::Hq {
            return Err(GhqError::ParseError("HQ cannot appear in a reserve field".to_string()));
        }
        reserve.add(pt, 1);
    }
    Ok(reserve)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTING_FEN: &str = "qr↓6/iii5/8/8/8/8/5III/6R↑Q IIIIIFFFPRRTH iiiiifffprrth r";

    #[test]
    fn starting_position_round_trips() {
        let board = from_fen(STARTING_FEN).unwrap();
        assert_eq!(to_fen(&board), STARTING_FEN);
    }

    #[test]
    fn starting_position_matches_builtin_constructor() {
        let from_fen_board = from_fen(STARTING_FEN).unwrap();
        let builtin = Board::starting_position();
        assert_eq!(to_fen(&from_fen_board), to_fen(&builtin));
    }

    #[test]
    fn empty_reserve_prints_as_dash() {
        let board = Board::empty();
        let hq_fen = to_fen(&board);
        assert!(hq_fen.contains(" - - r"));
    }

    #[test]
    fn malformed_rank_is_rejected() {
        assert!(from_fen("8/8/8/8/8/8/8/7 - - r").is_err());
    }
}
