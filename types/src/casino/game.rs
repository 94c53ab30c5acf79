use serde::{Deserialize, Serialize};

/// Casino game types matching the frontend panel tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Slots = 0,
    Roulette = 1,
    Poker = 2,
}

/// Settled outcome of a single round.
///
/// `Win` carries the chips credited (total return, stake included where the
/// game pays that way). `Push` carries the chips returned on a tie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win(u64),
    Loss,
    Push(u64),
}

impl RoundOutcome {
    /// Chips credited back to the player by this outcome.
    pub fn credited(&self) -> u64 {
        match self {
            RoundOutcome::Win(amount) => *amount,
            RoundOutcome::Loss => 0,
            RoundOutcome::Push(amount) => *amount,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, RoundOutcome::Win(_))
    }
}
