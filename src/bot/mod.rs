//! Bot opponent
//!
//! Move selection at three strengths over the rules engine's legal moves.
//! The bot is deliberately unaware of custom movement rules: it searches the
//! proxy position the engine sees, and the session re-validates (and falls
//! back from) its suggestion against the movement filter.
//!
//! # Strengths
//!
//! | Difficulty | Selection                                      |
//! |------------|------------------------------------------------|
//! | Easy       | uniform random legal move                      |
//! | Normal     | one-ply material scoring with jitter           |
//! | Hard       | three-ply negamax over the same evaluation     |

pub mod evaluation;
pub mod search;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shakmaty::{Chess, Move, Position};
use tracing::debug;

/// Bot strength setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotDifficulty {
    /// Picks any legal move at random.
    Easy,
    /// Greedy material play with a little randomness.
    #[default]
    Normal,
    /// Shallow lookahead; same evaluation as Normal, stronger play.
    Hard,
}

impl BotDifficulty {
    pub fn description(self) -> &'static str {
        match self {
            BotDifficulty::Easy => "random mover",
            BotDifficulty::Normal => "greedy material play",
            BotDifficulty::Hard => "three-ply lookahead",
        }
    }

    fn search_depth(self) -> u8 {
        match self {
            // Easy and Normal never search; the value is only used by Hard
            BotDifficulty::Easy | BotDifficulty::Normal => 1,
            BotDifficulty::Hard => 3,
        }
    }
}

/// Jitter applied to one-ply scores so Normal does not repeat itself.
const SCORE_JITTER: i32 = 10;

/// Pick a move for the side to move, or `None` when no legal move exists.
///
/// `None` means the position is already terminal (checkmate or stalemate)
/// and the caller should treat the game as over, not as an error.
pub fn select_move(position: &Chess, difficulty: BotDifficulty) -> Option<Move> {
    let moves = position.legal_moves();
    if moves.is_empty() {
        return None;
    }

    let mut rng = rand::rng();
    let chosen = match difficulty {
        BotDifficulty::Easy => moves.choose(&mut rng).cloned(),
        BotDifficulty::Normal => {
            let me = position.turn();
            let mut best: Option<(Move, i32)> = None;
            for mv in &moves {
                let mut next = position.clone();
                next.play_unchecked(mv);
                let score =
                    evaluation::evaluate(&next, me) + rng.random_range(-SCORE_JITTER..=SCORE_JITTER);
                if best.as_ref().map_or(true, |(_, s)| score > *s) {
                    best = Some((mv.clone(), score));
                }
            }
            best.map(|(mv, _)| mv)
        }
        BotDifficulty::Hard => {
            search::best_move(position, difficulty.search_depth()).map(|(mv, _)| mv)
        }
    };

    if let Some(mv) = &chosen {
        debug!("[BOT] {difficulty:?} suggests {mv:?}");
    }
    chosen
}
