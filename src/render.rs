//! An ASCII/unicode board renderer for terminals, using `colored` for
//! side-by-colour and bombardment-by-background highlighting.

use colored::Colorize;

use crate::core::board::Board;
use crate::core::piece::Side;
use crate::core::square::Square;

#[must_use]
/// Render `board` as an 8-rank grid, rank 8 first, red pieces in red and
/// blue pieces in cyan, with squares under enemy bombardment dimmed.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        out.push_str(&format!("{} ", rank + 1));
        for file in 0..8 {
            let sq = Square::new(rank, file).expect("rank/file in 0..8");
            let glyph = square_glyph(board, sq);
            out.push_str(&glyph);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

fn square_glyph(board: &Board, sq: Square) -> String {
    let under_fire = board.bombarded_by(Side::Red).contains(sq) || board.bombarded_by(Side::Blue).contains(sq);

    let Some(piece) = board.piece_at(sq) else {
        let dot = ".".to_string();
        return if under_fire { dot.dimmed().to_string() } else { dot };
    };

    let symbol = piece.symbol();
    let colored_symbol = match piece.side {
        Side::Red => symbol.red().bold(),
        Side::Blue => symbol.cyan().bold(),
    };
    if under_fire {
        colored_symbol.on_bright_black().to_string()
    } else {
        colored_symbol.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_eight_ranks_and_a_file_label() {
        let board = Board::starting_position();
        let text = render(&board);
        assert_eq!(text.lines().count(), 9);
        assert!(text.ends_with("a b c d e f g h\n"));
    }

    #[test]
    fn renders_empty_board_without_panicking() {
        let board = Board::empty();
        let text = render(&board);
        assert!(text.contains('.'));
    }
}
