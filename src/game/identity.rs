//! Side table tracking what each square's piece really is
//!
//! The rules engine only sees proxy roles; this table records, per square,
//! the actual custom piece standing there. It is deliberately a *separate*
//! structure from the engine's board: the engine stays the legality oracle,
//! the table overrides identity. Absence of an entry always means "the
//! engine's own piece type is the truth", which keeps the table minimal and
//! bounded by the number of custom pieces on the board.
//!
//! # Lockstep invariant
//!
//! [`IdentityTable::apply_move`] must run for every move the engine accepts,
//! player and bot alike. Skipping a single move leaves a stale entry behind
//! and silently corrupts every later filter decision, so the session funnels
//! all move application through one pipeline that ends here.

use std::collections::HashMap;

use shakmaty::{CastlingSide, Color, Move, Role, Square};

use crate::pieces::PieceKind;

/// The actual identity of one custom piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CustomPiece {
    pub kind: PieceKind,
    pub color: Color,
}

/// Mapping from board squares to actual custom piece identities.
///
/// Holds entries *only* for squares occupied by a custom piece; standard
/// pieces are implicit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentityTable {
    entries: HashMap<Square, CustomPiece>,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a custom piece at `square`. Standard kinds are never stored.
    pub fn insert(&mut self, square: Square, piece: CustomPiece) {
        debug_assert!(
            piece.kind.is_custom(),
            "identity table only holds custom pieces, got {:?}",
            piece.kind
        );
        if piece.kind.is_custom() {
            self.entries.insert(square, piece);
        }
    }

    pub fn get(&self, square: Square) -> Option<CustomPiece> {
        self.entries.get(&square).copied()
    }

    /// The actual kind at `square`, falling back to the engine-reported role.
    pub fn kind_at(&self, square: Square, engine_role: Role) -> PieceKind {
        self.entries
            .get(&square)
            .map(|piece| piece.kind)
            .unwrap_or_else(|| PieceKind::from_role(engine_role))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, CustomPiece)> + '_ {
        self.entries.iter().map(|(&square, &piece)| (square, piece))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Update the table for a move the engine has accepted.
    ///
    /// Handles the three square-remapping special cases before the general
    /// relocation:
    /// - en passant removes the victim entry at the square *behind* the
    ///   destination (destination file, origin rank);
    /// - castling relocates the rook entry h-file to f-file or a-file to
    ///   d-file on the mover's home rank;
    /// - promotion overrides identity: a promoted pawn becomes the plain
    ///   promoted piece, so no entry survives at the destination.
    pub fn apply_move(&mut self, mv: &Move) {
        let Some(from) = mv.from() else {
            // drop-style moves never occur in standard chess
            return;
        };

        if let Move::EnPassant { from, to } = *mv {
            self.entries.remove(&Square::from_coords(to.file(), from.rank()));
        }

        if let Move::Castle { king, rook } = *mv {
            let side = if rook > king {
                CastlingSide::KingSide
            } else {
                CastlingSide::QueenSide
            };
            if let Some(entry) = self.entries.remove(&rook) {
                self.entries
                    .insert(Square::from_coords(side.rook_to_file(), king.rank()), entry);
            }
            // the king itself can never be custom, nothing to relocate for it
            return;
        }

        let to = mv.to();
        let moved = self.entries.remove(&from);
        self.entries.remove(&to);

        match (moved, mv.promotion()) {
            // promotion always yields the plain promoted piece
            (_, Some(_)) => {}
            (Some(piece), None) => {
                self.entries.insert(to, piece);
            }
            (None, None) => {}
        }
    }
}
