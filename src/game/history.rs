//! Move history tracking
//!
//! Append-only record of every applied half-move. Each record carries the
//! actual (custom-aware) piece kinds, the SAN string, and the FEN of the
//! position after the move, so the UI can render the move list and preview
//! any earlier position without replaying the game.

use shakmaty::{Color, Role, Square};

use crate::pieces::PieceKind;

/// One applied half-move.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveRecord {
    /// 1-based half-move index.
    pub ply: u32,
    /// Full move number as shown in notation (increments after Black moves).
    pub move_number: u32,
    pub color: Color,
    /// Standard algebraic notation, including check and mate suffixes.
    pub san: String,
    pub from: Square,
    pub to: Square,
    /// Actual kind of the moved piece, custom identity included.
    pub moved: PieceKind,
    /// Actual kind of the captured piece, if the move captured.
    pub captured: Option<PieceKind>,
    /// Promotion role for promoting pawn moves.
    pub promotion: Option<Role>,
    /// FEN of the position after this move was applied.
    pub fen_after: String,
}

/// Chronological list of all moves made in the current game.
#[derive(Clone, Debug, Default)]
pub struct MoveHistory {
    moves: Vec<MoveRecord>,
}

impl MoveHistory {
    /// Append a record. Records are never mutated after this.
    pub fn push(&mut self, record: MoveRecord) {
        debug_assert_eq!(
            record.ply as usize,
            self.moves.len() + 1,
            "history plies must be contiguous"
        );
        self.moves.push(record);
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Record for a 1-based ply, if it has been played.
    pub fn get(&self, ply: u32) -> Option<&MoveRecord> {
        ply.checked_sub(1).and_then(|i| self.moves.get(i as usize))
    }

    /// FEN of the position after the given ply, for position preview.
    pub fn fen_after_ply(&self, ply: u32) -> Option<&str> {
        self.get(ply).map(|record| record.fen_after.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoveRecord> {
        self.moves.iter()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}
