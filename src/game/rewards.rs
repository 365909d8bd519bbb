//! End-of-game currency rewards
//!
//! Every finished game pays the player once: the full amount for a win, a
//! consolation amount for a loss or a draw. The ledger is a latch, so replayed
//! game-over events (a duplicate UI callback, a resign racing a mate check)
//! can never pay twice.

use tracing::info;

/// Coins granted to the player for winning a game.
pub const VICTORY_REWARD: u32 = 200;
/// Coins granted to the player for a loss or a draw.
pub const CONSOLATION_REWARD: u32 = 100;

/// The player's currency balance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    coins: u64,
}

impl Wallet {
    pub fn coins(&self) -> u64 {
        self.coins
    }

    pub fn credit(&mut self, amount: u32) {
        self.coins += u64::from(amount);
        info!("[REWARD] credited {amount} coins, balance {}", self.coins);
    }
}

/// One-shot settlement latch for a single game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardLedger {
    granted: bool,
}

impl RewardLedger {
    /// The amount to grant for this game, at most once.
    ///
    /// Returns `None` on every call after the first.
    pub fn settle(&mut self, player_won: bool) -> Option<u32> {
        if self.granted {
            return None;
        }
        self.granted = true;
        Some(if player_won { VICTORY_REWARD } else { CONSOLATION_REWARD })
    }

    pub fn is_settled(&self) -> bool {
        self.granted
    }

    /// Re-arm for a new game.
    pub fn reset(&mut self) {
        self.granted = false;
    }
}
