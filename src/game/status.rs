//! Session outcome taxonomy and result messages
//!
//! A session is in progress until exactly one terminal condition holds:
//! checkmate, a draw (with its reason), or resignation. The enum mirrors that
//! structure so callers can match on it, and `message()` renders the
//! deterministic result strings the UI shows.

use shakmaty::Color;

/// Why a game ended in a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal move for the side to move, king not in check.
    Stalemate,
    /// Neither side can deliver checkmate.
    InsufficientMaterial,
    /// The same position occurred three times.
    Repetition,
    /// The custom movement rules leave the side to move without a single
    /// allowed move even though the rules engine still generates some.
    Blocked,
}

impl DrawReason {
    pub fn describe(self) -> &'static str {
        match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::Repetition => "threefold repetition",
            DrawReason::Blocked => "blocked position",
        }
    }
}

/// Terminal state of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    InProgress,
    Checkmate { winner: Color },
    Draw { reason: DrawReason },
    Resigned { by: Color },
}

impl SessionOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, SessionOutcome::InProgress)
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, SessionOutcome::Draw { .. })
    }

    /// The winning side, if there is one. Resignation is won by the opponent.
    pub fn winner(&self) -> Option<Color> {
        match self {
            SessionOutcome::Checkmate { winner } => Some(*winner),
            SessionOutcome::Resigned { by } => Some(!*by),
            SessionOutcome::InProgress | SessionOutcome::Draw { .. } => None,
        }
    }

    /// Human-readable result message.
    pub fn message(&self) -> String {
        match self {
            SessionOutcome::InProgress => "Game in progress".to_string(),
            SessionOutcome::Checkmate { winner } => {
                format!("{} wins by checkmate!", color_name(*winner))
            }
            SessionOutcome::Draw { reason } => format!("Draw by {}", reason.describe()),
            SessionOutcome::Resigned { by } => {
                format!("{} resigned, {} wins", color_name(*by), color_name(!*by))
            }
        }
    }
}

pub(crate) fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
