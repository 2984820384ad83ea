//! The compact binary position format: 21 big-endian `u64`
//! masks, 3 signed turn-scratch bytes, then 12 big-endian `u32` reserve
//! counts, wrapped for transport in deflate + base64.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::core::bitboard::Mask;
use crate::core::board::{Board, FreeCaptureSnapshot};
use crate::core::piece::{PieceType, Side};
use crate::core::reserve::Reserve;
use crate::GhqError;

const PAYLOAD_LEN: usize = 21 * 8 + 3 + 12 * 4;

#[must_use]
/// Serialise `board` into the exact 219-byte binary layout.
pub fn to_bytes(board: &Board) -> Vec<u8> {
    let mut out = Vec::with_capacity(PAYLOAD_LEN);

    let (ob0, ob1, ob2) = board.orientation_bit_planes();
    let free_capture = board.free_capture();

    for mask in [
        board.occupied(),
        board.piece_mask(PieceType::Infantry),
        board.piece_mask(PieceType::ArmoredInfantry),
        board.piece_mask(PieceType::AirborneInfantry),
        board.piece_mask(PieceType::Artillery),
        board.piece_mask(PieceType::ArmoredArtillery),
        board.piece_mask(PieceType::HeavyArtillery),
        board.piece_mask(PieceType::Hq),
        board.occupied_by(Side::Red),
        board.occupied_by(Side::Blue),
        board.bombarded_by(Side::Red),
        board.bombarded_by(Side::Blue),
        board.adjacent_to_infantry(Side::Red),
        board.adjacent_to_infantry(Side::Blue),
        ob0,
        ob1,
        ob2,
        board.turn_pieces(),
        free_capture.clusters,
        free_capture.capturable_enemies,
        free_capture.allowance,
    ] {
        out.extend_from_slice(&mask.0.to_be_bytes());
    }

    out.push(side_byte(board.turn()) as u8);
    out.push(board.turn_moves() as u8);
    out.push(board.turn_auto_moves() as u8);

    for count in board.reserve(Side::Red).to_counts() {
        out.extend_from_slice(&count.to_be_bytes());
    }
    for count in board.reserve(Side::Blue).to_counts() {
        out.extend_from_slice(&count.to_be_bytes());
    }

    out
}

const fn side_byte(side: Side) -> i8 {
    match side {
        Side::Red => 0,
        Side::Blue => 1,
    }
}

fn side_from_byte(b: i8) -> Result<Side, GhqError> {
    match b {
        0 => Ok(Side::Red),
        1 => Ok(Side::Blue),
        _ => Err(GhqError::ParseError(format!("invalid turn byte: {b}"))),
    }
}

/// Deserialise a board from the exact binary layout written by [`to_bytes`].
pub fn from_bytes(bytes: &[u8]) -> Result<Board, GhqError> {
    if bytes.len() != PAYLOAD_LEN {
        return Err(GhqError::ParseError(format!(
            "expected {PAYLOAD_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let mut masks = [Mask::EMPTY; 21];
    for (i, slot) in masks.iter_mut().enumerate() {
        let chunk: [u8; 8] = bytes[i * 8..i * 8 + 8].try_into().expect("8-byte chunk");
        *slot = Mask::new(u64::from_be_bytes(chunk));
    }

    let scratch_offset = 21 * 8;
    let turn = side_from_byte(bytes[scratch_offset] as i8)?;
    let turn_moves = bytes[scratch_offset + 1] as i8;
    let turn_auto_moves = bytes[scratch_offset + 2] as i8;

    let reserve_offset = scratch_offset + 3;
    let mut read_counts = |base: usize| -> [u32; 6] {
        let mut counts = [0u32; 6];
        for (i, slot) in counts.iter_mut().enumerate() {
            let start = base + i * 4;
            let chunk: [u8; 4] = bytes[start..start + 4].try_into().expect("4-byte chunk");
            *slot = u32::from_be_bytes(chunk);
        }
        counts
    };
    let red_counts = read_counts(reserve_offset);
    let blue_counts = read_counts(reserve_offset + 6 * 4);

    Ok(Board::from_raw_fields(
        masks[0],
        masks[1],
        masks[2],
        masks[3],
        masks[4],
        masks[5],
        masks[6],
        masks[7],
        [masks[8], masks[9]],
        [masks[10], masks[11]],
        [masks[12], masks[13]],
        masks[14],
        masks[15],
        masks[16],
        masks[17],
        FreeCaptureSnapshot {
            clusters: masks[18],
            capturable_enemies: masks[19],
            allowance: masks[20],
        },
        turn,
        turn_moves,
        turn_auto_moves,
        [Reserve::from_counts(red_counts), Reserve::from_counts(blue_counts)],
    ))
}

#[must_use]
/// Wrap [`to_bytes`]'s output in deflate compression, then base64, for
/// transport over text-only channels.
pub fn to_transport(board: &Board) -> String {
    let raw = to_bytes(board);
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw).expect("writing to an in-memory buffer cannot fail");
    let compressed = encoder.finish().expect("finishing an in-memory deflate stream cannot fail");
    BASE64.encode(compressed)
}

/// Undo [`to_transport`].
pub fn from_transport(s: &str) -> Result<Board, GhqError> {
    let compressed = BASE64
        .decode(s.trim())
        .map_err(|e| GhqError::ParseError(format!("invalid base64: {e}")))?;
    let mut decoder = DeflateDecoder::new(&compressed[..]);
    let mut raw = Vec::new();
    decoder
        .read_to_end(&mut raw)
        .map_err(|e| GhqError::ParseError(format!("invalid deflate stream: {e}")))?;
    from_bytes(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_starting_position() {
        let board = Board::starting_position();
        let bytes = to_bytes(&board);
        assert_eq!(bytes.len(), PAYLOAD_LEN);
        let restored = from_bytes(&bytes).unwrap();
        assert_eq!(to_bytes(&restored), bytes);
    }

    #[test]
    fn transport_round_trips_through_base64_deflate() {
        let board = Board::starting_position();
        let text = to_transport(&board);
        let restored = from_transport(&text).unwrap();
        assert_eq!(to_bytes(&restored), to_bytes(&board));
    }

    #[test]
    fn rejects_wrong_length_payload() {
        assert!(from_bytes(&[0u8; 10]).is_err());
    }
}
