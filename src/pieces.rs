//! Piece catalog for Chess Reforged
//!
//! Every piece in the game, standard and custom, is one variant of
//! [`PieceKind`]. The catalog is a set of exhaustive lookups on that enum:
//! point cost, the standard role used to seed legal-move generation, and the
//! movement rule the filter applies on top of the generated moves.
//!
//! # Why a closed enum
//!
//! A custom piece only exists if it has a cost, a proxy role, and a movement
//! rule. Making `PieceKind` a closed sum type turns "lookup for an unknown
//! symbol" into a compile error: adding a seventeenth piece without extending
//! every catalog table fails exhaustiveness checking instead of returning
//! `None` at runtime.
//!
//! # Proxy roles
//!
//! The rules engine only understands the six standard roles. Each custom kind
//! maps onto the smallest standard role whose move generation is a superset of
//! the custom movement; the filter then prunes the generated moves down to the
//! custom rule. The proxy role also determines the piece's letter in composed
//! FEN strings.

use serde::{Deserialize, Serialize};
use shakmaty::Role;

/// One of the sixteen piece kinds of Chess Reforged.
///
/// The first six variants are the standard chess pieces; the remaining ten
/// are the custom pieces. Serialized symbol names are kebab-case
/// (`"stone-sentinel"`, `"war-elephant"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Lion,
    Footman,
    Dragon,
    Stonehurler,
    WarElephant,
    ArcaneSage,
    Bowguard,
    Galleon,
    CommandingSteed,
    StoneSentinel,
}

/// Movement-rule description consumed by the custom movement filter.
///
/// Deltas are measured in files (`dx`) and ranks (`dy`) between the origin
/// and destination of a candidate move; "Chebyshev" is `max(|dx|, |dy|)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRule {
    /// Trust the rules engine: every generated move for the proxy role is legal.
    Inherited,
    /// Chebyshev distance must fall within `min..=max`.
    Radial { min: u8, max: u8 },
    /// Diagonal only (`|dx| == |dy|`), at exactly `distance`.
    Diagonal { distance: u8 },
    /// Along a file or a rank, any distance.
    Orthogonal,
    /// One step forward without capturing, one step diagonally forward
    /// capturing, or one step sideways without capturing.
    FootmanStep,
    /// Not expressible as a board move; every candidate is rejected.
    Stationary,
}

impl PieceKind {
    /// All sixteen kinds, standard first.
    pub const ALL: [PieceKind; 16] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Lion,
        PieceKind::Footman,
        PieceKind::Dragon,
        PieceKind::Stonehurler,
        PieceKind::WarElephant,
        PieceKind::ArcaneSage,
        PieceKind::Bowguard,
        PieceKind::Galleon,
        PieceKind::CommandingSteed,
        PieceKind::StoneSentinel,
    ];

    /// Whether this kind is one of the ten custom pieces.
    pub fn is_custom(self) -> bool {
        self.as_role().is_none()
    }

    /// The standard role this kind *is*, for the standard six only.
    pub fn as_role(self) -> Option<Role> {
        match self {
            PieceKind::Pawn => Some(Role::Pawn),
            PieceKind::Knight => Some(Role::Knight),
            PieceKind::Bishop => Some(Role::Bishop),
            PieceKind::Rook => Some(Role::Rook),
            PieceKind::Queen => Some(Role::Queen),
            PieceKind::King => Some(Role::King),
            _ => None,
        }
    }

    /// The kind corresponding to a plain engine role.
    pub fn from_role(role: Role) -> PieceKind {
        match role {
            Role::Pawn => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook => PieceKind::Rook,
            Role::Queen => PieceKind::Queen,
            Role::King => PieceKind::King,
        }
    }

    /// The standard role used to seed legal-move generation for this kind.
    ///
    /// Standard kinds map to themselves. Custom kinds map to the smallest
    /// standard superset of their movement; this is also the letter the kind
    /// takes in a composed FEN.
    pub fn proxy_role(self) -> Role {
        match self {
            PieceKind::Pawn => Role::Pawn,
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook => Role::Rook,
            PieceKind::Queen => Role::Queen,
            PieceKind::King => Role::King,
            PieceKind::Lion => Role::Queen,
            PieceKind::Footman => Role::Queen,
            PieceKind::Dragon => Role::Queen,
            PieceKind::Stonehurler => Role::Rook,
            PieceKind::WarElephant => Role::Bishop,
            PieceKind::ArcaneSage => Role::Queen,
            PieceKind::Bowguard => Role::Pawn,
            PieceKind::Galleon => Role::Rook,
            PieceKind::CommandingSteed => Role::Knight,
            PieceKind::StoneSentinel => Role::Queen,
        }
    }

    /// Point cost used by army budget validation. The king costs nothing.
    pub fn cost(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
            PieceKind::Lion => 7,
            PieceKind::Footman => 2,
            PieceKind::Dragon => 8,
            PieceKind::Stonehurler => 4,
            PieceKind::WarElephant => 3,
            PieceKind::ArcaneSage => 5,
            PieceKind::Bowguard => 3,
            PieceKind::Galleon => 6,
            PieceKind::CommandingSteed => 4,
            PieceKind::StoneSentinel => 5,
        }
    }

    /// The movement rule the filter applies to this kind.
    ///
    /// `Inherited` means the proxy role's generated moves are taken as-is:
    /// that covers the standard six and the custom kinds whose special
    /// mechanic (bowguard shots, commanding-steed rally) is not a board move.
    pub fn movement(self) -> MoveRule {
        match self {
            PieceKind::Pawn
            | PieceKind::Knight
            | PieceKind::Bishop
            | PieceKind::Rook
            | PieceKind::Queen
            | PieceKind::King
            | PieceKind::Bowguard
            | PieceKind::CommandingSteed => MoveRule::Inherited,
            PieceKind::Lion => MoveRule::Radial { min: 2, max: 2 },
            PieceKind::Footman => MoveRule::FootmanStep,
            PieceKind::Dragon => MoveRule::Radial { min: 1, max: 4 },
            PieceKind::Stonehurler => MoveRule::Stationary,
            PieceKind::WarElephant => MoveRule::Diagonal { distance: 2 },
            PieceKind::ArcaneSage => MoveRule::Radial { min: 1, max: 1 },
            PieceKind::Galleon => MoveRule::Orthogonal,
            PieceKind::StoneSentinel => MoveRule::Radial { min: 1, max: 2 },
        }
    }

    /// Display name for UI and status text.
    pub fn display_name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Lion => "Lion",
            PieceKind::Footman => "Footman",
            PieceKind::Dragon => "Dragon",
            PieceKind::Stonehurler => "Stonehurler",
            PieceKind::WarElephant => "War Elephant",
            PieceKind::ArcaneSage => "Arcane Sage",
            PieceKind::Bowguard => "Bowguard",
            PieceKind::Galleon => "Galleon",
            PieceKind::CommandingSteed => "Commanding Steed",
            PieceKind::StoneSentinel => "Stone Sentinel",
        }
    }
}
