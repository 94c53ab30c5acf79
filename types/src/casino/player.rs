use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::STARTING_CHIPS;

/// Raised when a debit would overdraw the player's chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient chips: have {have}, need {need}")]
pub struct InsufficientChips {
    pub have: u64,
    pub need: u64,
}

/// Player state owned by the application root.
///
/// Chips are mutated only through [`Player::credit`] and [`Player::debit`],
/// so the balance can never go negative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub chips: u64,
    /// Mock wallet address once connected.
    pub wallet: Option<String>,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            chips: STARTING_CHIPS,
            wallet: None,
        }
    }

    /// Apply the wallet-connect result: store the address and adopt the
    /// reported balance.
    pub fn connect(&mut self, address: String, chips: u64) {
        self.wallet = Some(address);
        self.chips = chips;
    }

    pub fn credit(&mut self, amount: u64) {
        self.chips = self.chips.saturating_add(amount);
    }

    pub fn debit(&mut self, amount: u64) -> Result<(), InsufficientChips> {
        if self.chips < amount {
            return Err(InsufficientChips {
                have: self.chips,
                need: amount,
            });
        }
        self.chips -= amount;
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(String::new())
    }
}
