//! Casino game engine.
//!
//! This module contains the game logic for the casino panel:
//! - Slots ("Oink & Spin")
//! - Roulette ("Oinklette")
//! - Heads-up poker ("Piggy Hold'em")
//!
//! All "waiting" (spin animations, the opponent's thinking pause) is modeled
//! as a pending round carrying an absolute settle time. Callers poll with an
//! explicit `now`; nothing in the engine sleeps.

pub mod poker;
pub mod roulette;
pub mod slots;


use piggyworld_types::casino::InsufficientChips;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Milliseconds a slot spin stays pending before it can settle.
pub const SLOT_SPIN_MS: i64 = 2_000;

/// Milliseconds the roulette wheel spins before it can settle.
pub const WHEEL_SPIN_MS: i64 = 3_000;

/// Milliseconds the poker opponent "thinks" before responding.
pub const OPPONENT_DELAY_MS: i64 = 1_000;

/// Seedable random number generator shared by all games.
///
/// Wraps a ChaCha stream cipher rng so tests can seed it and assert exact
/// outcomes; production uses [`GameRng::from_entropy`].
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a deterministic rng from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create an rng seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: u8) -> u8 {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }

    /// Get a random f32 value in range [0.0, 1.0).
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Bernoulli draw with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Draw an index from a discrete weighted distribution.
    pub fn weighted(&mut self, weights: &[u32]) -> usize {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return 0;
        }
        let mut roll = self.inner.gen_range(0..total);
        for (i, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return i;
            }
            roll -= weight;
        }
        weights.len() - 1
    }

    /// Shuffle a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.inner.gen_range(0..=i);
            slice.swap(i, j);
        }
    }

    /// Create a shuffled deck of 52 cards.
    /// Cards are 0-51: suit = card/13, rank = card%13.
    pub fn create_deck(&mut self) -> Vec<u8> {
        let mut deck: Vec<u8> = (0..52).collect();
        self.shuffle(&mut deck);
        deck
    }

    /// Draw a card from the deck without replacement.
    pub fn draw_card(&mut self, deck: &mut Vec<u8>) -> Option<u8> {
        if deck.is_empty() {
            return None;
        }
        let idx = self.next_bounded(deck.len() as u8) as usize;
        Some(deck.swap_remove(idx))
    }

    /// Spin the roulette wheel (0-36).
    pub fn spin_wheel(&mut self) -> u8 {
        self.next_bounded(37)
    }
}

/// Suit of a card (0-3).
pub fn card_suit(card: u8) -> u8 {
    card / 13
}

/// Rank of a card (0-12, where 0 = two and 12 = ace).
pub fn card_rank(card: u8) -> u8 {
    card % 13
}

/// Human-readable card label, e.g. "A♠" or "10♥".
pub fn card_label(card: u8) -> String {
    const RANKS: [&str; 13] = [
        "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A",
    ];
    const SUITS: [&str; 4] = ["♠", "♥", "♦", "♣"];
    format!(
        "{}{}",
        RANKS[card_rank(card) as usize],
        SUITS[(card_suit(card) as usize).min(3)]
    )
}

/// Error during game execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The player cannot cover the bet.
    #[error(transparent)]
    InsufficientChips(#[from] InsufficientChips),
    /// A spin or response is already pending.
    #[error("round already in progress")]
    RoundInProgress,
    /// Settle was called with nothing pending.
    #[error("no round pending settlement")]
    NoPendingRound,
    /// The pending round's settle time has not been reached.
    #[error("pending round is not due yet")]
    NotSettleable,
    /// Bet amount or target out of range.
    #[error("invalid bet")]
    InvalidBet,
    /// Action is not legal in the current state.
    #[error("invalid move for current state")]
    InvalidMove,
    /// The hand has already finished.
    #[error("hand already complete")]
    HandComplete,
    /// No more cards to draw.
    #[error("deck is exhausted")]
    DeckExhausted,
}
