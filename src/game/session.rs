//! Game session state machine
//!
//! A [`GameSession`] owns everything one game needs: the rules-engine
//! position, the identity table, history, captures, the resignation flag,
//! the reward latch, and the pending bot reply. Every mutation goes through
//! one of the public operations (`reset`, `make_move`, `make_bot_move`,
//! `resign`), each of which completes atomically; the caller serializes
//! calls. In a multi-client host, wrap each session in its own mutex or
//! actor.
//!
//! # Move pipeline
//!
//! Player and bot moves funnel through the same private `apply` path: SAN,
//! history record, capture bookkeeping, identity-table update, position
//! update, repetition count, reward settlement, and bot scheduling. The
//! identity table must be updated for every accepted move, so there is
//! exactly one place that does it.
//!
//! # Bot scheduling
//!
//! The cosmetic "thinking" delay is host-driven. After a player move the
//! session arms a pending reply stamped with the current generation; the
//! host waits [`BOT_REPLY_DELAY`] and calls
//! [`GameSession::run_scheduled_bot_move`], which refuses stale generations.
//! `reset` bumps the generation, so a reply scheduled against a previous
//! game can never land on the new one.

use std::collections::HashMap;
use std::time::Duration;

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role, Square};
use tracing::{error, info, warn};

use crate::bot::{self, BotDifficulty};
use crate::game::captured::CapturedPieces;
use crate::game::filter::is_custom_legal;
use crate::game::history::{MoveHistory, MoveRecord};
use crate::game::identity::IdentityTable;
use crate::game::rewards::{RewardLedger, Wallet};
use crate::game::status::{color_name, DrawReason, SessionOutcome};
use crate::pieces::PieceKind;

/// Nominal delay between a player's move and the bot's reply, purely so the
/// UI can render the player's move first.
pub const BOT_REPLY_DELAY: Duration = Duration::from_millis(600);

/// Who controls each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Both sides driven by `make_move`.
    VsHuman,
    /// One side replies through the bot pipeline.
    VsBot { bot_color: Color },
}

/// One square of the [`GameSession::board`] grid, with the actual kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardPiece {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// One entry of the filtered move list shown to the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub san: String,
}

/// Bot reply armed by the last player move, stamped with the generation it
/// was scheduled against.
#[derive(Clone, Copy, Debug, Default)]
struct PendingBotReply {
    scheduled: Option<u64>,
}

impl PendingBotReply {
    fn request(&mut self, generation: u64) -> bool {
        if self.scheduled.is_some() {
            return false;
        }
        self.scheduled = Some(generation);
        true
    }

    fn take(&mut self) -> Option<u64> {
        self.scheduled.take()
    }

    fn is_pending(&self) -> bool {
        self.scheduled.is_some()
    }
}

/// A single game of Chess Reforged.
pub struct GameSession {
    position: Chess,
    identities: IdentityTable,
    history: MoveHistory,
    captured: CapturedPieces,
    player_color: Color,
    mode: GameMode,
    difficulty: BotDifficulty,
    resigned_by: Option<Color>,
    rewards: RewardLedger,
    wallet: Wallet,
    /// Zobrist hash of every position seen this game, for threefold detection.
    repetition: HashMap<u64, u32>,
    pending_bot: PendingBotReply,
    generation: u64,
}

impl GameSession {
    /// A session against the bot; the bot takes the other color.
    pub fn vs_bot(player_color: Color, difficulty: BotDifficulty) -> Self {
        let mut session = Self::bare(
            GameMode::VsBot { bot_color: !player_color },
            difficulty,
            player_color,
        );
        session.reset(player_color, None, None);
        session
    }

    /// A hot-seat session; both sides move through `make_move`.
    pub fn vs_human() -> Self {
        let mut session = Self::bare(GameMode::VsHuman, BotDifficulty::default(), Color::White);
        session.reset(Color::White, None, None);
        session
    }

    fn bare(mode: GameMode, difficulty: BotDifficulty, player_color: Color) -> Self {
        Self {
            position: Chess::default(),
            identities: IdentityTable::new(),
            history: MoveHistory::default(),
            captured: CapturedPieces::default(),
            player_color,
            mode,
            difficulty,
            resigned_by: None,
            rewards: RewardLedger::default(),
            wallet: Wallet::default(),
            repetition: HashMap::new(),
            pending_bot: PendingBotReply::default(),
            generation: 0,
        }
    }

    /// Start a new game.
    ///
    /// Loads the composed FEN when given one, otherwise the standard start.
    /// A malformed FEN falls back to the standard start: composition is the
    /// only producer of custom FENs, so a bad one is a logic bug and is
    /// logged as an error rather than poisoning the session. The identity
    /// mapping is only kept when its FEN actually loaded.
    pub fn reset(
        &mut self,
        player_color: Color,
        custom_fen: Option<&str>,
        mapping: Option<IdentityTable>,
    ) {
        // invalidate any bot reply scheduled against the previous game
        self.generation += 1;
        self.pending_bot = PendingBotReply::default();

        let mut mapping_applies = true;
        self.position = match custom_fen {
            None => Chess::default(),
            Some(fen) => match load_position(fen) {
                Some(position) => position,
                None => {
                    error!(
                        "[SESSION] malformed FEN {fen:?}, falling back to the standard start"
                    );
                    mapping_applies = false;
                    Chess::default()
                }
            },
        };
        self.identities = match mapping {
            Some(mapping) if mapping_applies => mapping,
            _ => IdentityTable::new(),
        };

        self.history.clear();
        self.captured.clear();
        self.resigned_by = None;
        self.rewards.reset();
        self.repetition.clear();
        self.note_position();

        self.player_color = player_color;
        if let GameMode::VsBot { bot_color } = &mut self.mode {
            *bot_color = !player_color;
        }

        info!(
            "[SESSION] new game: player {}, {} custom pieces",
            color_name(player_color),
            self.identities.len()
        );

        // the bot opens when it holds the side to move
        if self.bot_color() == Some(self.position.turn()) && !self.is_game_over() {
            self.schedule_bot_reply();
        }
    }

    /// Attempt a player move. Returns `false`, leaving all state untouched,
    /// when the game is over, it is not the player's turn in a bot game, or
    /// the move is illegal under engine or custom rules.
    ///
    /// Promotions are always to a queen.
    pub fn make_move(&mut self, from: Square, to: Square) -> bool {
        if self.outcome().is_over() {
            return false;
        }
        if self.bot_color() == Some(self.position.turn()) {
            return false;
        }
        let Some(mv) = self.select_candidate(from, to) else {
            return false;
        };
        if !is_custom_legal(&mv, &self.identities) {
            return false;
        }
        self.apply(mv);
        true
    }

    /// Let the bot move, if it is the bot's turn and the game is running.
    ///
    /// The bot searches the proxy position and may suggest a move the custom
    /// filter rejects; the session then falls back to the first allowed
    /// move. Returns `false` without moving when no custom-legal move
    /// exists.
    pub fn make_bot_move(&mut self) -> bool {
        let Some(bot_color) = self.bot_color() else {
            return false;
        };
        if self.outcome().is_over() || self.position.turn() != bot_color {
            return false;
        }
        // a directly driven bot move delivers any armed reply
        self.pending_bot.take();

        let allowed: Vec<Move> = self
            .position
            .legal_moves()
            .iter()
            .filter(|mv| is_custom_legal(mv, &self.identities))
            .cloned()
            .collect();
        if allowed.is_empty() {
            warn!(
                "[BOT] no custom-legal move available for {}",
                color_name(bot_color)
            );
            return false;
        }

        let chosen = match bot::select_move(&self.position, self.difficulty) {
            Some(suggested)
                if allowed
                    .iter()
                    .any(|mv| mv.from() == suggested.from() && mv.to() == suggested.to()) =>
            {
                suggested
            }
            Some(_) => {
                warn!("[BOT] suggestion rejected by the movement filter, using first allowed move");
                allowed[0].clone()
            }
            None => {
                warn!("[BOT] engine found no move for {}", color_name(bot_color));
                return false;
            }
        };

        self.apply(chosen);
        true
    }

    /// Run the bot reply armed by the last player move, unless the session
    /// was reset since it was scheduled.
    pub fn run_scheduled_bot_move(&mut self) -> bool {
        match self.pending_bot.take() {
            Some(generation) if generation == self.generation => self.make_bot_move(),
            Some(_) => {
                info!("[SESSION] dropping bot reply scheduled against a previous game");
                false
            }
            None => false,
        }
    }

    /// Whether a bot reply is armed and waiting for the host to run it.
    pub fn bot_reply_pending(&self) -> bool {
        self.pending_bot.is_pending()
    }

    /// Concede the game for `by`. No-op once the game is over.
    pub fn resign(&mut self, by: Color) -> bool {
        if self.outcome().is_over() {
            return false;
        }
        self.resigned_by = Some(by);
        info!("[SESSION] {} resigned", color_name(by));
        self.settle_reward_if_over();
        true
    }

    /// Current terminal state, `InProgress` while the game runs.
    pub fn outcome(&self) -> SessionOutcome {
        if let Some(by) = self.resigned_by {
            return SessionOutcome::Resigned { by };
        }
        if self.position.is_checkmate() {
            return SessionOutcome::Checkmate { winner: !self.position.turn() };
        }
        if self.position.is_stalemate() {
            return SessionOutcome::Draw { reason: DrawReason::Stalemate };
        }
        if self.position.is_insufficient_material() {
            return SessionOutcome::Draw { reason: DrawReason::InsufficientMaterial };
        }
        if self.is_threefold() {
            return SessionOutcome::Draw { reason: DrawReason::Repetition };
        }
        if !self.side_to_move_has_custom_move() {
            // the engine still sees moves, the custom rules do not
            return SessionOutcome::Draw { reason: DrawReason::Blocked };
        }
        SessionOutcome::InProgress
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_over()
    }

    /// Deterministic status line for the UI.
    pub fn status_text(&self) -> String {
        let outcome = self.outcome();
        if outcome.is_over() {
            return outcome.message();
        }
        let turn = color_name(self.position.turn());
        if self.position.is_check() {
            return format!("{turn} is in check");
        }
        if self.bot_reply_pending() {
            return "Bot is thinking...".to_string();
        }
        format!("{turn} to move")
    }

    /// The board as an 8x8 grid (rank-major, rank 1 first), each occupied
    /// square carrying its *actual* kind.
    pub fn board(&self) -> [[Option<BoardPiece>; 8]; 8] {
        let mut grid = [[None; 8]; 8];
        let board = self.position.board();
        for square in Square::ALL {
            if let Some(piece) = board.piece_at(square) {
                grid[square.rank() as usize][square.file() as usize] = Some(BoardPiece {
                    square,
                    kind: self.identities.kind_at(square, piece.role),
                    color: piece.color,
                });
            }
        }
        grid
    }

    /// Custom-legal moves from one square, for UI highlighting. Promotions
    /// collapse to the queen move.
    pub fn legal_moves(&self, from: Square) -> Vec<LegalMove> {
        if self.outcome().is_over() {
            return Vec::new();
        }
        self.position
            .legal_moves()
            .iter()
            .filter(|mv| mv.from() == Some(from))
            .filter(|mv| mv.promotion().map_or(true, |role| role == Role::Queen))
            .filter(|mv| is_custom_legal(mv, &self.identities))
            .map(|mv| LegalMove {
                from,
                to: mv.to(),
                san: SanPlus::from_move(self.position.clone(), mv).to_string(),
            })
            .collect()
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn player_color(&self) -> Color {
        self.player_color
    }

    pub fn bot_color(&self) -> Option<Color> {
        match self.mode {
            GameMode::VsHuman => None,
            GameMode::VsBot { bot_color } => Some(bot_color),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> BotDifficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: BotDifficulty) {
        self.difficulty = difficulty;
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// The engine-legal move for `from -> to`, preferring queen promotion.
    fn select_candidate(&self, from: Square, to: Square) -> Option<Move> {
        let mut under_promotion = None;
        for mv in &self.position.legal_moves() {
            if mv.from() != Some(from) || mv.to() != to {
                continue;
            }
            match mv.promotion() {
                None | Some(Role::Queen) => return Some(mv.clone()),
                Some(_) => under_promotion = Some(mv.clone()),
            }
        }
        under_promotion
    }

    /// The one pipeline every accepted move goes through.
    fn apply(&mut self, mv: Move) {
        let Some(from) = mv.from() else {
            debug_assert!(false, "engine produced a move without an origin");
            return;
        };
        let color = self.position.turn();
        let to = mv.to();
        let ply = self.history.len() as u32 + 1;
        let move_number = self.position.fullmoves().get();
        let moved = self.identities.kind_at(from, mv.role());
        let captured = self.captured_kind(&mv);
        let san = SanPlus::from_move(self.position.clone(), &mv).to_string();

        let mut next = self.position.clone();
        next.play_unchecked(&mv);

        if let Some(kind) = captured {
            self.captured.record(color, kind);
        }
        self.identities.apply_move(&mv);
        self.position = next;
        self.note_position();

        info!("[SESSION] {} played {san} ({from} to {to})", color_name(color));

        let fen_after = self.fen();
        self.history.push(MoveRecord {
            ply,
            move_number,
            color,
            san,
            from,
            to,
            moved,
            captured,
            promotion: mv.promotion(),
            fen_after,
        });

        self.settle_reward_if_over();

        if let Some(bot_color) = self.bot_color() {
            if self.position.turn() == bot_color && !self.outcome().is_over() {
                self.schedule_bot_reply();
            }
        }
    }

    /// Actual kind of the piece a move captures, if any. En passant victims
    /// stand behind the destination square.
    fn captured_kind(&self, mv: &Move) -> Option<PieceKind> {
        if let Move::EnPassant { from, to } = *mv {
            let victim = Square::from_coords(to.file(), from.rank());
            return Some(self.identities.kind_at(victim, Role::Pawn));
        }
        mv.capture()
            .map(|role| self.identities.kind_at(mv.to(), role))
    }

    fn schedule_bot_reply(&mut self) {
        if self.pending_bot.request(self.generation) {
            info!("[SESSION] bot reply scheduled, nominal delay {BOT_REPLY_DELAY:?}");
        }
    }

    fn settle_reward_if_over(&mut self) {
        let outcome = self.outcome();
        if !outcome.is_over() {
            return;
        }
        let player_won = outcome.winner() == Some(self.player_color);
        if let Some(amount) = self.rewards.settle(player_won) {
            self.wallet.credit(amount);
            info!("[SESSION] game over: {}", outcome.message());
        }
    }

    fn note_position(&mut self) {
        let hash: Zobrist64 = self.position.zobrist_hash(EnPassantMode::Legal);
        *self.repetition.entry(hash.0).or_insert(0) += 1;
    }

    fn is_threefold(&self) -> bool {
        let hash: Zobrist64 = self.position.zobrist_hash(EnPassantMode::Legal);
        self.repetition.get(&hash.0).is_some_and(|&count| count >= 3)
    }

    fn side_to_move_has_custom_move(&self) -> bool {
        self.position
            .legal_moves()
            .iter()
            .any(|mv| is_custom_legal(mv, &self.identities))
    }
}

fn load_position(fen: &str) -> Option<Chess> {
    let parsed: Fen = fen.parse().ok()?;
    parsed.into_position(CastlingMode::Standard).ok()
}
