//! Fixed-depth negamax search with alpha-beta pruning
//!
//! The strongest bot setting looks a few plies ahead over the same material
//! evaluation the one-ply setting uses. Depth is small and fixed, so the
//! search is plain recursion; mates found earlier score more extreme than
//! mates found later, which steers the bot toward the fastest win.

use shakmaty::{Chess, Move, Position};

use super::evaluation::evaluate;

/// Score magnitude for delivering checkmate.
pub const MATE_SCORE: i32 = 100_000;

const INFINITY: i32 = 1_000_000;

/// The best move for the side to move, searched to `depth` plies.
///
/// Returns `None` only when the position has no legal moves.
pub fn best_move(position: &Chess, depth: u8) -> Option<(Move, i32)> {
    let moves = position.legal_moves();
    let mut best: Option<(Move, i32)> = None;
    let mut alpha = -INFINITY;

    for mv in &moves {
        let mut next = position.clone();
        next.play_unchecked(mv);
        let score = -negamax(&next, depth.saturating_sub(1), -INFINITY, -alpha);
        if best.as_ref().map_or(true, |(_, s)| score > *s) {
            best = Some((mv.clone(), score));
        }
        alpha = alpha.max(score);
    }

    best
}

fn negamax(position: &Chess, depth: u8, mut alpha: i32, beta: i32) -> i32 {
    if position.is_checkmate() {
        // the side to move is mated; deeper remaining depth means the mate
        // was reached sooner
        return -(MATE_SCORE + i32::from(depth));
    }
    if position.is_stalemate() || position.is_insufficient_material() {
        return 0;
    }
    if depth == 0 {
        return evaluate(position, position.turn());
    }

    let mut best = -INFINITY;
    for mv in &position.legal_moves() {
        let mut next = position.clone();
        next.play_unchecked(mv);
        let score = -negamax(&next, depth - 1, -beta, -alpha);
        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}
