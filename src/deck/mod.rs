//! Army building: decks, the deck collection, and board composition

pub mod army;
pub mod compose;
pub mod roster;

pub use army::{budget_for_level, ArmyDeck, DeckError, BASE_ARMY_POINTS, MAX_LEVEL_BONUS};
pub use compose::{compose, ComposedBoard};
pub use roster::DeckRoster;
