//! Army decks: a player's chosen home-rank setup for one color
//!
//! A deck places standard and custom pieces on the color's three home ranks,
//! under a point budget that grows with player level. Decks are plain serde
//! records (camelCase JSON, matching the stored document layout) identified
//! by UUID and timestamped on every mutation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shakmaty::{Color, File, Rank, Square};
use uuid::Uuid;

use crate::pieces::PieceKind;

/// Point cost of the classic army (eight pawns, two knights, two bishops,
/// two rooks, one queen); the budget floor every player starts with.
pub const BASE_ARMY_POINTS: u32 = 39;
/// Levels past the first each add one point, up to this many.
pub const MAX_LEVEL_BONUS: u32 = 12;

/// Army point budget for a player level.
pub fn budget_for_level(level: u32) -> u32 {
    BASE_ARMY_POINTS + level.saturating_sub(1).min(MAX_LEVEL_BONUS)
}

/// Rejected deck mutations and validation failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("square {square} is outside this army's home ranks")]
    OutsideHomeRanks { square: Square },

    #[error("pawn-type piece cannot stand on the back rank at {square}")]
    BackRankPawn { square: Square },

    #[error("army has no king")]
    MissingKing,

    #[error("army already has a king at {square}")]
    ExtraKing { square: Square },

    #[error("army costs {total} points, budget is {budget}")]
    OverBudget { total: u32, budget: u32 },
}

/// One saved army for one color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmyDeck {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "side")]
    pub color: Color,
    /// Occupied squares. Piece color is the deck color by construction.
    #[serde(with = "placement")]
    pub placement: HashMap<Square, PieceKind>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_main: bool,
}

impl ArmyDeck {
    /// A fresh, empty deck.
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            color,
            placement: HashMap::new(),
            created_at: now,
            last_modified: now,
            is_main: false,
        }
    }

    /// A deck holding the classic chess setup for `color`.
    pub fn standard_template(color: Color) -> Self {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut deck = Self::new("Classic Army", color);
        let [back, second, _] = Self::home_ranks(color);
        for (file, kind) in File::ALL.into_iter().zip(BACK_ROW) {
            deck.placement.insert(Square::from_coords(file, back), kind);
        }
        for file in File::ALL {
            deck.placement
                .insert(Square::from_coords(file, second), PieceKind::Pawn);
        }
        deck
    }

    /// The three home-most ranks for a color, nearest first.
    pub fn home_ranks(color: Color) -> [Rank; 3] {
        match color {
            Color::White => [Rank::First, Rank::Second, Rank::Third],
            Color::Black => [Rank::Eighth, Rank::Seventh, Rank::Sixth],
        }
    }

    /// Put a piece on a square, replacing any previous occupant.
    ///
    /// Squares outside the home ranks are rejected, as are pawn-proxy kinds
    /// on the back rank (FEN cannot represent a pawn there, and composition
    /// must always produce a loadable position).
    pub fn place(&mut self, square: Square, kind: PieceKind) -> Result<(), DeckError> {
        if !Self::home_ranks(self.color).contains(&square.rank()) {
            return Err(DeckError::OutsideHomeRanks { square });
        }
        let back = Self::home_ranks(self.color)[0];
        if kind.proxy_role() == shakmaty::Role::Pawn && square.rank() == back {
            return Err(DeckError::BackRankPawn { square });
        }
        self.placement.insert(square, kind);
        self.last_modified = Utc::now();
        Ok(())
    }

    /// Clear a square, returning what stood there.
    pub fn remove(&mut self, square: Square) -> Option<PieceKind> {
        let removed = self.placement.remove(&square);
        if removed.is_some() {
            self.last_modified = Utc::now();
        }
        removed
    }

    /// Total point cost of the placed pieces.
    pub fn point_total(&self) -> u32 {
        self.placement.values().map(|kind| kind.cost()).sum()
    }

    /// Check the deck is playable at the given level: exactly one king and
    /// within budget.
    pub fn validate(&self, level: u32) -> Result<(), DeckError> {
        let mut king: Option<Square> = None;
        for (&square, &kind) in &self.placement {
            if kind == PieceKind::King {
                if let Some(previous) = king {
                    // report the earlier board square for a stable message
                    let square = previous.min(square);
                    return Err(DeckError::ExtraKing { square });
                }
                king = Some(square);
            }
        }
        if king.is_none() {
            return Err(DeckError::MissingKing);
        }

        let total = self.point_total();
        let budget = budget_for_level(level);
        if total > budget {
            return Err(DeckError::OverBudget { total, budget });
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Deck colors stored as `"white"` / `"black"`.
mod side {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use shakmaty::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if color.is_white() { "white" } else { "black" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "white" => Ok(Color::White),
            "black" => Ok(Color::Black),
            other => Err(de::Error::unknown_variant(other, &["white", "black"])),
        }
    }
}

/// Placements stored as a map of coordinate strings (`"e1"`) to piece
/// symbols, sorted for stable output.
mod placement {
    use std::collections::{BTreeMap, HashMap};

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use shakmaty::Square;

    use crate::pieces::PieceKind;

    pub fn serialize<S: Serializer>(
        map: &HashMap<Square, PieceKind>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let by_name: BTreeMap<String, PieceKind> = map
            .iter()
            .map(|(square, &kind)| (square.to_string(), kind))
            .collect();
        by_name.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Square, PieceKind>, D::Error> {
        let by_name = BTreeMap::<String, PieceKind>::deserialize(deserializer)?;
        by_name
            .into_iter()
            .map(|(name, kind)| {
                name.parse::<Square>()
                    .map(|square| (square, kind))
                    .map_err(de::Error::custom)
            })
            .collect()
    }
}
