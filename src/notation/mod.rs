//! Text formats: the FEN-like position string and move notation. Both are
//! thin collaborators over
//! [`crate::core`]; neither is consulted by move generation or application.

pub mod fen;
pub mod movetext;
