//! Custom movement filter
//!
//! The rules engine generates moves for proxy roles; this module decides, per
//! candidate move, whether the *actual* piece at the origin is allowed to
//! make it. The filter is a pure predicate: no state, no ordering effects,
//! the same move and table always produce the same answer.

use shakmaty::{Color, Move, Role};

use crate::game::identity::IdentityTable;
use crate::pieces::{MoveRule, PieceKind};

/// Whether `mv`, generated by the rules engine, is legal under the custom
/// movement rules recorded in `identities`.
///
/// An origin square without a table entry is a standard piece and the
/// engine's word is final. One cross-cutting exception runs before the
/// per-kind rules: a pawn-role mover may never capture a stone sentinel.
pub fn is_custom_legal(mv: &Move, identities: &IdentityTable) -> bool {
    let Some(from) = mv.from() else {
        return true;
    };

    if mv.role() == Role::Pawn && mv.capture().is_some() {
        if let Some(target) = identities.get(mv.to()) {
            if target.kind == PieceKind::StoneSentinel {
                return false;
            }
        }
    }

    let Some(mover) = identities.get(from) else {
        return true;
    };

    let to = mv.to();
    let dx = to.file() as i32 - from.file() as i32;
    let dy = to.rank() as i32 - from.rank() as i32;
    let chebyshev = dx.abs().max(dy.abs());

    match mover.kind.movement() {
        MoveRule::Inherited => true,
        MoveRule::Stationary => false,
        MoveRule::Radial { min, max } => {
            (i32::from(min)..=i32::from(max)).contains(&chebyshev)
        }
        MoveRule::Diagonal { distance } => {
            dx.abs() == dy.abs() && chebyshev == i32::from(distance)
        }
        MoveRule::Orthogonal => dx == 0 || dy == 0,
        MoveRule::FootmanStep => {
            let forward = match mover.color {
                Color::White => 1,
                Color::Black => -1,
            };
            let capturing = mv.capture().is_some();
            (dx == 0 && dy == forward && !capturing)
                || (dx.abs() == 1 && dy == forward && capturing)
                || (dy == 0 && dx.abs() == 1 && !capturing)
        }
    }
}
