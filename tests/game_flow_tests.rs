//! Game flow integration tests
//!
//! Full-pipeline flows through [`GameSession`]:
//! - turn alternation and rejection of out-of-turn moves
//! - identity tracking across captures, en passant, and long games
//! - bot scheduling, fallback, and the blocked-position dead end
//! - one-shot reward settlement

use chess_reforged::deck::{compose, ArmyDeck};
use chess_reforged::game::{
    CustomPiece, DrawReason, GameSession, IdentityTable, SessionOutcome,
};
use chess_reforged::pieces::PieceKind;
use chess_reforged::BotDifficulty;
use shakmaty::{Color, Square};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn mapping(pieces: &[(Square, PieceKind, Color)]) -> IdentityTable {
    let mut table = IdentityTable::new();
    for &(square, kind, color) in pieces {
        table.insert(square, CustomPiece { kind, color });
    }
    table
}

/// First custom-legal move available to the side to move.
fn any_move(session: &GameSession) -> Option<(Square, Square)> {
    Square::ALL.iter().find_map(|&from| {
        session
            .legal_moves(from)
            .first()
            .map(|mv| (mv.from, mv.to))
    })
}

/// Every identity entry must sit on an occupied square whose engine piece
/// matches the entry's color and proxy role.
fn assert_identity_table_consistent(session: &GameSession) {
    let grid = session.board();
    for (square, piece) in session.identities().iter() {
        let occupant = grid[square.rank() as usize][square.file() as usize]
            .unwrap_or_else(|| panic!("identity entry at empty square {square}"));
        assert_eq!(occupant.color, piece.color, "color mismatch at {square}");
        assert_eq!(
            occupant.kind, piece.kind,
            "board must surface the custom kind at {square}"
        );
    }
}

// ============================================================================
// Turn alternation
// ============================================================================

#[test]
fn test_turns_alternate_and_history_grows() {
    let mut session = GameSession::vs_human();

    assert!(session.make_move(Square::E2, Square::E4));
    assert!(!session.make_move(Square::D2, Square::D4), "white cannot move twice");
    assert!(session.make_move(Square::E7, Square::E5));

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().get(1).unwrap().color, Color::White);
    assert_eq!(session.history().get(2).unwrap().color, Color::Black);
    assert_eq!(session.history().get(2).unwrap().move_number, 1);
}

// ============================================================================
// Identity tracking through the full pipeline
// ============================================================================

#[test]
fn test_en_passant_cleans_up_the_victims_identity() {
    init_tracing();
    // white king + pawn against a black king + bowguard (a relabeled pawn)
    let mut white = ArmyDeck::new("w", Color::White);
    white.place(Square::E1, PieceKind::King).unwrap();
    white.place(Square::E2, PieceKind::Pawn).unwrap();
    let mut black = ArmyDeck::new("b", Color::Black);
    black.place(Square::E8, PieceKind::King).unwrap();
    black.place(Square::D7, PieceKind::Bowguard).unwrap();

    let composed = compose(Some(&white), Some(&black));
    let mut session = GameSession::vs_human();
    session.reset(Color::White, Some(&composed.fen), Some(composed.identities));

    assert!(session.make_move(Square::E2, Square::E4));
    assert!(session.make_move(Square::E8, Square::D8));
    assert!(session.make_move(Square::E4, Square::E5));
    // the bowguard double-steps like the pawn the engine thinks it is
    assert!(session.make_move(Square::D7, Square::D5));
    assert_eq!(
        session.identities().get(Square::D5).map(|p| p.kind),
        Some(PieceKind::Bowguard)
    );

    // en passant: capture lands on d6, the victim stood on d5
    assert!(session.make_move(Square::E5, Square::D6));

    assert!(
        session.identities().get(Square::D5).is_none(),
        "victim entry must be removed from d5"
    );
    assert!(session.identities().is_empty());
    assert_eq!(
        session.history().last().unwrap().captured,
        Some(PieceKind::Bowguard),
        "the capture records the actual kind"
    );
    assert_identity_table_consistent(&session);
}

#[test]
fn test_identity_table_stays_consistent_over_a_long_game() {
    init_tracing();
    // two custom-heavy armies, bot against bot-driven player moves
    let mut white = ArmyDeck::standard_template(Color::White);
    white.place(Square::A1, PieceKind::Galleon).unwrap();
    white.place(Square::C1, PieceKind::WarElephant).unwrap();
    white.place(Square::D2, PieceKind::Footman).unwrap();
    let mut black = ArmyDeck::standard_template(Color::Black);
    black.place(Square::H8, PieceKind::Galleon).unwrap();
    black.place(Square::B8, PieceKind::CommandingSteed).unwrap();
    black.place(Square::D7, PieceKind::Footman).unwrap();
    assert!(white.validate(6).is_ok());
    assert!(black.validate(6).is_ok());

    let composed = compose(Some(&white), Some(&black));
    let mut session = GameSession::vs_bot(Color::White, BotDifficulty::Easy);
    session.reset(Color::White, Some(&composed.fen), Some(composed.identities));
    assert_eq!(session.identities().len(), 6);
    assert_identity_table_consistent(&session);

    for _ in 0..40 {
        if session.is_game_over() {
            break;
        }
        let moved = if session.turn() == Color::White {
            match any_move(&session) {
                Some((from, to)) => session.make_move(from, to),
                None => break,
            }
        } else {
            session.make_bot_move()
        };
        if !moved {
            break;
        }
        assert_identity_table_consistent(&session);
    }
}

// ============================================================================
// Bot behavior
// ============================================================================

#[test]
fn test_bot_falls_back_when_its_best_move_is_filtered() {
    init_tracing();
    // the black stonehurler appears to the bot as a rook staring at a free
    // queen; the filter forbids every stonehurler move
    let mut session = GameSession::vs_bot(Color::White, BotDifficulty::Normal);
    session.reset(
        Color::White,
        Some("7k/8/8/8/8/2r5/2Q4K/8 b - - 0 1"),
        Some(mapping(&[(Square::C3, PieceKind::Stonehurler, Color::Black)])),
    );

    let fen_before = session.fen();
    assert!(session.make_bot_move());

    let last = session.history().last().expect("bot move recorded");
    assert_ne!(last.from, Square::C3, "the stonehurler must not move");
    assert_eq!(session.history().len(), 1, "history grows by exactly one entry");
    assert_eq!(session.turn(), Color::White, "turn flips to the player");
    assert_ne!(session.fen(), fen_before);
    assert_eq!(
        session.identities().get(Square::C3).map(|p| p.kind),
        Some(PieceKind::Stonehurler),
        "the stonehurler stays put"
    );
    assert_identity_table_consistent(&session);
}

#[test]
fn test_blocked_side_is_a_draw_not_a_hang() {
    // black's king is walled in by its own stonehurlers; the engine still
    // generates rook moves for them, the filter rejects every one
    let session_mapping = mapping(&[
        (Square::A7, PieceKind::Stonehurler, Color::Black),
        (Square::B7, PieceKind::Stonehurler, Color::Black),
        (Square::B8, PieceKind::Stonehurler, Color::Black),
    ]);
    let mut session = GameSession::vs_bot(Color::White, BotDifficulty::Easy);
    session.reset(
        Color::White,
        Some("kr6/rr6/8/8/8/8/8/4K3 b - - 0 1"),
        Some(session_mapping),
    );

    assert_eq!(
        session.outcome(),
        SessionOutcome::Draw { reason: DrawReason::Blocked }
    );
    assert!(session.is_game_over());
    assert_eq!(session.status_text(), "Draw by blocked position");
    assert!(!session.make_bot_move(), "no move can be played");
}

#[test]
fn test_fresh_session_reports_bot_thinking_when_bot_opens() {
    let session = GameSession::vs_bot(Color::Black, BotDifficulty::Easy);
    assert!(session.bot_reply_pending());
    assert_eq!(session.status_text(), "Bot is thinking...");
}

// ============================================================================
// Rewards
// ============================================================================

#[test]
fn test_checkmate_pays_once_and_only_once() {
    init_tracing();
    let mut session = GameSession::vs_human();

    // fool's mate: the white player loses
    assert!(session.make_move(Square::F2, Square::F3));
    assert!(session.make_move(Square::E7, Square::E5));
    assert!(session.make_move(Square::G2, Square::G4));
    assert!(session.make_move(Square::D8, Square::H4));

    assert_eq!(
        session.outcome(),
        SessionOutcome::Checkmate { winner: Color::Black }
    );
    assert_eq!(session.status_text(), "Black wins by checkmate!");
    assert_eq!(session.wallet().coins(), 100, "loss pays the consolation amount");

    // duplicate game-over events must not pay again
    assert!(!session.resign(Color::White));
    assert!(!session.make_move(Square::A2, Square::A3));
    assert_eq!(session.wallet().coins(), 100);
}

#[test]
fn test_winning_pays_the_full_reward() {
    let mut session = GameSession::vs_human();

    // scholar's mate: the white player wins
    assert!(session.make_move(Square::E2, Square::E4));
    assert!(session.make_move(Square::E7, Square::E5));
    assert!(session.make_move(Square::D1, Square::H5));
    assert!(session.make_move(Square::B8, Square::C6));
    assert!(session.make_move(Square::F1, Square::C4));
    assert!(session.make_move(Square::G8, Square::F6));
    assert!(session.make_move(Square::H5, Square::F7));

    assert_eq!(
        session.outcome(),
        SessionOutcome::Checkmate { winner: Color::White }
    );
    assert_eq!(session.wallet().coins(), 200);
}

#[test]
fn test_wallet_carries_across_games_in_one_session() {
    let mut session = GameSession::vs_bot(Color::White, BotDifficulty::Easy);
    session.resign(Color::White);
    assert_eq!(session.wallet().coins(), 100);

    session.reset(Color::White, None, None);
    assert!(!session.is_game_over(), "reset re-arms the game");
    session.resign(Color::White);
    assert_eq!(session.wallet().coins(), 200, "each game settles once");
}
