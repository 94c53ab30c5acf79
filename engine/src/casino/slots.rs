//! Slot machine ("Oink & Spin").
//!
//! Three reels drawn independently from a fixed weighted symbol set. Two
//! deliberate anti-frequent-win throttles are part of the product, not bugs:
//! a 30% post-draw chance of forcibly diversifying one reel, and a 60%
//! honor chance on two-of-a-kind payouts.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use piggyworld_types::casino::{Player, RoundOutcome, BET_STEP, HISTORY_LEN, MAX_BET, MIN_BET};
use tracing::debug;

use super::{GameError, GameRng, SLOT_SPIN_MS};

/// Reel symbols, rarest (highest multiplier) first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Symbol {
    Pig = 0,
    Frog = 1,
    Ape = 2,
    Alien = 3,
    Snake = 4,
    Dino = 5,
    Whale = 6,
}

/// All symbols, index-aligned with [`WEIGHTS`].
pub const SYMBOLS: [Symbol; 7] = [
    Symbol::Pig,
    Symbol::Frog,
    Symbol::Ape,
    Symbol::Alien,
    Symbol::Snake,
    Symbol::Dino,
    Symbol::Whale,
];

/// Draw weights: the higher the weight, the more common the symbol.
pub const WEIGHTS: [u32; 7] = [1, 3, 6, 10, 20, 40, 80];

impl Symbol {
    /// Triple-match payout multiplier.
    pub fn multiplier(self) -> u64 {
        match self {
            Symbol::Pig => 50,
            Symbol::Frog => 20,
            Symbol::Ape => 10,
            Symbol::Alien => 8,
            Symbol::Snake => 6,
            Symbol::Dino => 4,
            Symbol::Whale => 2,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Symbol::Pig => "🐖",
            Symbol::Frog => "🐸",
            Symbol::Ape => "🦍",
            Symbol::Alien => "👽",
            Symbol::Snake => "🐍",
            Symbol::Dino => "🦖",
            Symbol::Whale => "🐋",
        }
    }
}

/// Draw one symbol from the weighted distribution.
fn draw_symbol(rng: &mut GameRng) -> Symbol {
    SYMBOLS[rng.weighted(&WEIGHTS)]
}

/// Settled result of a spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinOutcome {
    pub reels: [Symbol; 3],
    pub outcome: RoundOutcome,
}

#[derive(Clone, Copy, Debug)]
struct PendingSpin {
    bet: u64,
    settles_at: DateTime<Utc>,
}

/// Slot machine state.
#[derive(Clone, Debug)]
pub struct SlotMachine {
    bet: u64,
    reels: Option<[Symbol; 3]>,
    pending: Option<PendingSpin>,
    last_outcome: Option<RoundOutcome>,
    history: VecDeque<RoundOutcome>,
}

impl SlotMachine {
    pub fn new() -> Self {
        Self {
            bet: MIN_BET,
            reels: None,
            pending: None,
            last_outcome: None,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Set the bet. Must be a step-aligned amount within range, and no spin
    /// may be in flight.
    pub fn set_bet(&mut self, amount: u64) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::RoundInProgress);
        }
        if amount < MIN_BET || amount > MAX_BET || amount % BET_STEP != 0 {
            return Err(GameError::InvalidBet);
        }
        self.bet = amount;
        Ok(())
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    /// Final reels of the last settled spin, if any.
    pub fn reels(&self) -> Option<[Symbol; 3]> {
        self.reels
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    /// Last settled outcomes, oldest first, capped at [`HISTORY_LEN`].
    pub fn history(&self) -> &VecDeque<RoundOutcome> {
        &self.history
    }

    /// Whether the pending spin (if any) is due at `now`.
    pub fn ready(&self, now: DateTime<Utc>) -> bool {
        self.pending
            .map(|pending| now >= pending.settles_at)
            .unwrap_or(false)
    }

    /// Start a spin: deduct the bet immediately, settle later.
    pub fn spin(&mut self, player: &mut Player, now: DateTime<Utc>) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::RoundInProgress);
        }
        player.debit(self.bet)?;
        self.last_outcome = None;
        self.pending = Some(PendingSpin {
            bet: self.bet,
            settles_at: now + Duration::milliseconds(SLOT_SPIN_MS),
        });
        debug!(bet = self.bet, "slot spin started");
        Ok(())
    }

    /// Settle a due spin: draw the final reels, evaluate and pay out.
    pub fn settle(
        &mut self,
        player: &mut Player,
        rng: &mut GameRng,
        now: DateTime<Utc>,
    ) -> Result<SpinOutcome, GameError> {
        let pending = self.pending.ok_or(GameError::NoPendingRound)?;
        if now < pending.settles_at {
            return Err(GameError::NotSettleable);
        }
        self.pending = None;

        let mut reels = [
            draw_symbol(rng),
            draw_symbol(rng),
            draw_symbol(rng),
        ];

        // Anti-triple throttle: 30% of the time one reel is forced to differ
        // from the first reel's current symbol.
        if rng.chance(0.3) {
            let target = rng.next_bounded(3) as usize;
            let first = reels[0];
            let mut different = draw_symbol(rng);
            while different == first {
                different = draw_symbol(rng);
            }
            reels[target] = different;
        }

        let outcome = evaluate(reels, pending.bet, rng);
        player.credit(outcome.credited());

        self.reels = Some(reels);
        self.last_outcome = Some(outcome);
        self.history.push_back(outcome);
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }

        debug!(?reels, ?outcome, "slot spin settled");
        Ok(SpinOutcome { reels, outcome })
    }
}

impl Default for SlotMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Payout evaluation for final reels.
fn evaluate(reels: [Symbol; 3], bet: u64, rng: &mut GameRng) -> RoundOutcome {
    let [a, b, c] = reels;
    if a == b && b == c {
        return RoundOutcome::Win(bet * a.multiplier());
    }
    // Two of a kind pays a third of the triple rate, and only 60% of the
    // time (the other 40% counts as a loss despite the partial match).
    if (a == b || b == c || a == c) && rng.chance(0.6) {
        let symbol = if a == b {
            a
        } else if b == c {
            b
        } else {
            a
        };
        return RoundOutcome::Win(bet * symbol.multiplier() / 3);
    }
    RoundOutcome::Loss
}
