//! Roulette ("Oinklette") with a multi-bet ledger.
//!
//! Bets accumulate per key until the wheel is spun; the ledger is cleared
//! after every settlement regardless of outcome. Payout multipliers are
//! total-return: a winning straight bet of 10 credits 360.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use piggyworld_types::casino::{Player, RoundOutcome, HISTORY_LEN};
use tracing::debug;

use super::{GameError, GameRng, WHEEL_SPIN_MS};

/// Red numbers on the wheel (0 is green, the rest are black).
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Check if a number is red.
pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

/// A wagerable position on the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum BetKey {
    /// Single number 0-36.
    Straight(u8),
    Red,
    Black,
    Even,
    Odd,
    /// 1-18.
    Low,
    /// 19-36.
    High,
    /// Dozens: 0 = 1-12, 1 = 13-24, 2 = 25-36.
    Dozen(u8),
}

impl BetKey {
    fn validate(&self) -> Result<(), GameError> {
        match self {
            BetKey::Straight(number) if *number > 36 => Err(GameError::InvalidBet),
            BetKey::Dozen(dozen) if *dozen > 2 => Err(GameError::InvalidBet),
            _ => Ok(()),
        }
    }

    /// Total-return multiplier applied to a winning stake.
    fn payout_multiplier(&self) -> u64 {
        match self {
            BetKey::Straight(_) => 36,
            BetKey::Dozen(_) => 3,
            _ => 2,
        }
    }

    /// Whether this bet wins for the drawn number.
    fn wins(&self, result: u8) -> bool {
        // Zero loses everything except a straight bet on 0.
        if result == 0 {
            return matches!(self, BetKey::Straight(0));
        }
        match self {
            BetKey::Straight(number) => *number == result,
            BetKey::Red => is_red(result),
            BetKey::Black => !is_red(result),
            BetKey::Even => result % 2 == 0,
            BetKey::Odd => result % 2 == 1,
            BetKey::Low => (1..=18).contains(&result),
            BetKey::High => (19..=36).contains(&result),
            BetKey::Dozen(dozen) => (result - 1) / 12 == *dozen,
        }
    }
}

/// Settled result of a wheel spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelOutcome {
    pub number: u8,
    pub outcome: RoundOutcome,
}

#[derive(Clone, Copy, Debug)]
struct PendingSpin {
    settles_at: DateTime<Utc>,
}

/// Roulette table state.
#[derive(Clone, Debug)]
pub struct RouletteTable {
    bets: BTreeMap<BetKey, u64>,
    pending: Option<PendingSpin>,
    last_number: Option<u8>,
    last_outcome: Option<RoundOutcome>,
    history: VecDeque<u8>,
}

impl RouletteTable {
    pub fn new() -> Self {
        Self {
            bets: BTreeMap::new(),
            pending: None,
            last_number: None,
            last_outcome: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn bets(&self) -> &BTreeMap<BetKey, u64> {
        &self.bets
    }

    /// Sum of all staked amounts.
    pub fn total_staked(&self) -> u64 {
        self.bets.values().sum()
    }

    pub fn last_number(&self) -> Option<u8> {
        self.last_number
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    /// Drawn numbers, most recent first, capped at [`HISTORY_LEN`].
    pub fn history(&self) -> &VecDeque<u8> {
        &self.history
    }

    /// Whether the pending spin (if any) is due at `now`.
    pub fn ready(&self, now: DateTime<Utc>) -> bool {
        self.pending
            .map(|pending| now >= pending.settles_at)
            .unwrap_or(false)
    }

    /// Stake `amount` on `key`, accumulating with any existing stake there.
    /// Chips are deducted immediately.
    pub fn place_bet(
        &mut self,
        player: &mut Player,
        key: BetKey,
        amount: u64,
    ) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::RoundInProgress);
        }
        if amount == 0 {
            return Err(GameError::InvalidBet);
        }
        key.validate()?;
        player.debit(amount)?;
        *self.bets.entry(key).or_insert(0) += amount;
        Ok(())
    }

    /// Refund every staked amount and empty the ledger.
    /// Returns the refunded total.
    pub fn clear_bets(&mut self, player: &mut Player) -> Result<u64, GameError> {
        if self.pending.is_some() {
            return Err(GameError::RoundInProgress);
        }
        let refund = self.total_staked();
        player.credit(refund);
        self.bets.clear();
        Ok(refund)
    }

    /// Start the wheel. Requires at least one bet on the table.
    pub fn spin(&mut self, now: DateTime<Utc>) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::RoundInProgress);
        }
        if self.bets.is_empty() {
            return Err(GameError::InvalidMove);
        }
        self.last_outcome = None;
        self.pending = Some(PendingSpin {
            settles_at: now + Duration::milliseconds(WHEEL_SPIN_MS),
        });
        debug!(staked = self.total_staked(), "wheel spinning");
        Ok(())
    }

    /// Settle a due spin: draw the number, evaluate every bet independently
    /// and sum the winnings. The ledger is cleared win or lose.
    pub fn settle(
        &mut self,
        player: &mut Player,
        rng: &mut GameRng,
        now: DateTime<Utc>,
    ) -> Result<WheelOutcome, GameError> {
        let pending = self.pending.ok_or(GameError::NoPendingRound)?;
        if now < pending.settles_at {
            return Err(GameError::NotSettleable);
        }
        self.pending = None;

        let number = rng.spin_wheel();
        let mut winnings: u64 = 0;
        for (key, amount) in &self.bets {
            if key.wins(number) {
                winnings = winnings.saturating_add(amount.saturating_mul(key.payout_multiplier()));
            }
        }
        self.bets.clear();

        let outcome = if winnings > 0 {
            RoundOutcome::Win(winnings)
        } else {
            RoundOutcome::Loss
        };
        player.credit(outcome.credited());

        self.last_number = Some(number);
        self.last_outcome = Some(outcome);
        self.history.push_front(number);
        while self.history.len() > HISTORY_LEN {
            self.history.pop_back();
        }

        debug!(number, ?outcome, "wheel settled");
        Ok(WheelOutcome { number, outcome })
    }
}

impl Default for RouletteTable {
    fn default() -> Self {
        Self::new()
    }
}
