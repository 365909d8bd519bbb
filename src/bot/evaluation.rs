//! Position evaluation
//!
//! Material count plus a small bonus for occupying the four center squares.
//! Scores are in centipawns from the given side's perspective; the king
//! carries no material value.

use shakmaty::{Chess, Color, Position, Role, Square};

/// Centipawn value of an engine role.
pub fn role_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 300,
        Role::Bishop => 300,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

/// The four squares worth holding.
pub const CENTER: [Square; 4] = [Square::D4, Square::D5, Square::E4, Square::E5];

/// Bonus per own piece on a center square.
pub const CENTER_BONUS: i32 = 15;

/// Evaluate `position` from `perspective`'s point of view.
pub fn evaluate(position: &Chess, perspective: Color) -> i32 {
    let board = position.board();
    let mut score = 0;

    for square in Square::ALL {
        if let Some(piece) = board.piece_at(square) {
            let sign = if piece.color == perspective { 1 } else { -1 };
            score += sign * role_value(piece.role);
            if CENTER.contains(&square) {
                score += sign * CENTER_BONUS;
            }
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;
    use shakmaty::CastlingMode;

    fn position(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap()
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let start = Chess::default();
        assert_eq!(evaluate(&start, Color::White), 0);
        assert_eq!(evaluate(&start, Color::Black), 0);
    }

    #[test]
    fn test_missing_queen_swings_the_score() {
        // black queen removed from the starting position
        let pos = position("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1");
        assert_eq!(evaluate(&pos, Color::White), 900);
        assert_eq!(evaluate(&pos, Color::Black), -900);
    }

    #[test]
    fn test_center_occupancy_earns_a_bonus() {
        let with_center = position("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1");
        let off_center = position("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1");
        assert_eq!(
            evaluate(&with_center, Color::White) - evaluate(&off_center, Color::White),
            CENTER_BONUS
        );
    }

    #[test]
    fn test_perspectives_are_symmetric() {
        let pos = position("4k3/8/8/3pp3/8/8/PPP5/4K3 w - - 0 1");
        assert_eq!(
            evaluate(&pos, Color::White),
            -evaluate(&pos, Color::Black)
        );
    }
}
