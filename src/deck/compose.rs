//! Composing two decks into a playable starting position
//!
//! Produces the two artifacts a game session is loaded from: a FEN string in
//! which every custom piece appears as its proxy role's letter, and the
//! identity table recording which squares actually hold custom pieces. The
//! FEN always starts White to move with castling and en passant disabled,
//! since composed armies have no castling story.

use shakmaty::Color;

use crate::game::identity::{CustomPiece, IdentityTable};
use crate::pieces::PieceKind;

use super::army::ArmyDeck;

/// A composed starting position: proxy-role FEN plus the identity table.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedBoard {
    pub fen: String,
    pub identities: IdentityTable,
}

/// Build the starting position for a game between two decks.
///
/// Either deck may be absent; its half of the board is simply empty.
/// Deterministic: the same decks always produce the same FEN and table.
pub fn compose(white: Option<&ArmyDeck>, black: Option<&ArmyDeck>) -> ComposedBoard {
    let mut grid: [[Option<(PieceKind, Color)>; 8]; 8] = [[None; 8]; 8];
    let mut identities = IdentityTable::new();

    for deck in [white, black].into_iter().flatten() {
        for (&square, &kind) in &deck.placement {
            grid[square.rank() as usize][square.file() as usize] = Some((kind, deck.color));
            if kind.is_custom() {
                identities.insert(square, CustomPiece { kind, color: deck.color });
            }
        }
    }

    let mut fen = String::new();
    for rank in (0..8usize).rev() {
        let mut empty_run = 0u8;
        for file in 0..8usize {
            match grid[rank][file] {
                Some((kind, color)) => {
                    if empty_run > 0 {
                        fen.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    let role = kind.proxy_role();
                    fen.push(match color {
                        Color::White => role.upper_char(),
                        Color::Black => role.char(),
                    });
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            fen.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            fen.push('/');
        }
    }
    fen.push_str(" w - - 0 1");

    ComposedBoard { fen, identities }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    #[test]
    fn test_empty_decks_compose_to_an_empty_board() {
        let composed = compose(None, None);
        assert_eq!(composed.fen, "8/8/8/8/8/8/8/8 w - - 0 1");
        assert!(composed.identities.is_empty());
    }

    #[test]
    fn test_standard_pieces_stay_out_of_the_identity_table() {
        //! A king and a pawn compose to plain FEN with no table entries
        let mut deck = ArmyDeck::new("minimal", Color::White);
        deck.place(Square::E1, PieceKind::King).unwrap();
        deck.place(Square::E2, PieceKind::Pawn).unwrap();

        let composed = compose(Some(&deck), None);
        assert_eq!(composed.fen, "8/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert!(composed.identities.is_empty());
    }

    #[test]
    fn test_custom_piece_appears_as_its_proxy_letter() {
        //! A stone sentinel on a1 is written as a queen and recorded in the table
        let mut deck = ArmyDeck::new("sentinel", Color::White);
        deck.place(Square::A1, PieceKind::StoneSentinel).unwrap();

        let composed = compose(Some(&deck), None);
        assert_eq!(composed.fen, "8/8/8/8/8/8/8/Q7 w - - 0 1");
        assert_eq!(composed.identities.len(), 1);
        let entry = composed.identities.get(Square::A1).unwrap();
        assert_eq!(entry.kind, PieceKind::StoneSentinel);
        assert_eq!(entry.color, Color::White);
    }

    #[test]
    fn test_black_pieces_are_lowercase() {
        let mut deck = ArmyDeck::new("black", Color::Black);
        deck.place(Square::E8, PieceKind::King).unwrap();
        deck.place(Square::D7, PieceKind::Dragon).unwrap();

        let composed = compose(None, Some(&deck));
        assert_eq!(composed.fen, "4k3/3q4/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(
            composed.identities.get(Square::D7).map(|p| p.kind),
            Some(PieceKind::Dragon)
        );
    }

    #[test]
    fn test_two_full_decks_load_into_the_rules_engine() {
        //! Composition of two classic templates is the standard start, minus
        //! castling rights
        use shakmaty::fen::Fen;
        use shakmaty::{CastlingMode, Chess};

        let white = ArmyDeck::standard_template(Color::White);
        let black = ArmyDeck::standard_template(Color::Black);
        let composed = compose(Some(&white), Some(&black));

        assert_eq!(
            composed.fen,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
        );
        assert!(composed.identities.is_empty());

        let fen: Fen = composed.fen.parse().expect("composed FEN parses");
        let position: Result<Chess, _> = fen.into_position(CastlingMode::Standard);
        assert!(position.is_ok(), "composed FEN must load");
    }

    #[test]
    fn test_composition_is_deterministic() {
        let mut white = ArmyDeck::new("w", Color::White);
        white.place(Square::E1, PieceKind::King).unwrap();
        white.place(Square::C2, PieceKind::Lion).unwrap();
        white.place(Square::F2, PieceKind::Galleon).unwrap();

        let first = compose(Some(&white), None);
        let second = compose(Some(&white), None);
        assert_eq!(first, second);
    }
}
