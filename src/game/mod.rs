//! Game core: identity tracking, movement filtering, and the session
//!
//! - `identity` - side table mapping squares to actual custom pieces
//! - `filter` - pure predicate pruning engine moves to custom rules
//! - `history` - append-only move records with SAN and FEN snapshots
//! - `captured` - per-side capture lists and material advantage
//! - `status` - terminal-state taxonomy and result messages
//! - `rewards` - wallet and one-shot end-of-game settlement
//! - `session` - the state machine tying everything together

pub mod captured;
pub mod filter;
pub mod history;
pub mod identity;
pub mod rewards;
pub mod session;
pub mod status;

pub use captured::CapturedPieces;
pub use filter::is_custom_legal;
pub use history::{MoveHistory, MoveRecord};
pub use identity::{CustomPiece, IdentityTable};
pub use rewards::{RewardLedger, Wallet, CONSOLATION_REWARD, VICTORY_REWARD};
pub use session::{BoardPiece, GameMode, GameSession, LegalMove, BOT_REPLY_DELAY};
pub use status::{DrawReason, SessionOutcome};
