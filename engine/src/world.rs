//! Application root owning the player and every game.
//!
//! `World` is the single entry point a frontend or server would drive: it
//! routes actions to the games, settles due rounds on [`World::poll`], and
//! keeps a short cross-game activity feed.

use std::collections::VecDeque;

use chrono::NaiveDate;
use tracing::info;

use piggyworld_types::casino::{
    GameType, Player, RoundOutcome, HISTORY_LEN, MOCK_WALLET_ADDRESS, MOCK_WALLET_BALANCE,
};

use crate::casino::poker::{HandResult, HeadsUpPoker, OpponentMove};
use crate::casino::roulette::{BetKey, RouletteTable, WheelOutcome};
use crate::casino::slots::{SlotMachine, SpinOutcome, Symbol};
use crate::casino::{GameError, GameRng};
use crate::checkin::{CheckInError, CheckInReceipt, CheckInStatus, DailyCheckIn};
use crate::clock::Clock;
use crate::storage::Storage;

/// Something that happened during a [`World::poll`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldEvent {
    SlotsSettled {
        reels: [Symbol; 3],
        outcome: RoundOutcome,
    },
    RouletteSettled {
        number: u8,
        outcome: RoundOutcome,
    },
    Opponent(OpponentMove),
    HandFinished {
        result: HandResult,
        credited: u64,
    },
}

pub struct World<S: Storage, C: Clock> {
    player: Player,
    slots: SlotMachine,
    roulette: RouletteTable,
    poker: Option<HeadsUpPoker>,
    poker_recorded: bool,
    checkin: DailyCheckIn<S>,
    clock: C,
    rng: GameRng,
    activity: VecDeque<(GameType, RoundOutcome)>,
}

impl<S: Storage, C: Clock> World<S, C> {
    pub fn new(name: String, storage: S, clock: C, rng: GameRng) -> Self {
        Self {
            player: Player::new(name),
            slots: SlotMachine::new(),
            roulette: RouletteTable::new(),
            poker: None,
            poker_recorded: true,
            checkin: DailyCheckIn::new(storage),
            clock,
            rng,
            activity: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn slots(&self) -> &SlotMachine {
        &self.slots
    }

    pub fn roulette(&self) -> &RouletteTable {
        &self.roulette
    }

    pub fn poker(&self) -> Option<&HeadsUpPoker> {
        self.poker.as_ref()
    }

    /// Recent settled rounds across all games, most recent first.
    pub fn activity(&self) -> &VecDeque<(GameType, RoundOutcome)> {
        &self.activity
    }

    fn record(&mut self, game: GameType, outcome: RoundOutcome) {
        self.activity.push_front((game, outcome));
        while self.activity.len() > HISTORY_LEN {
            self.activity.pop_back();
        }
    }

    /// Connect the mock wallet: store its address and adopt its balance.
    pub fn connect_wallet(&mut self) -> &Player {
        self.player
            .connect(MOCK_WALLET_ADDRESS.to_string(), MOCK_WALLET_BALANCE);
        info!(address = MOCK_WALLET_ADDRESS, "wallet connected");
        &self.player
    }

    // Slots

    pub fn set_slot_bet(&mut self, amount: u64) -> Result<(), GameError> {
        self.slots.set_bet(amount)
    }

    pub fn spin_slots(&mut self) -> Result<(), GameError> {
        let now = self.clock.now();
        self.slots.spin(&mut self.player, now)
    }

    // Roulette

    pub fn place_roulette_bet(&mut self, key: BetKey, amount: u64) -> Result<(), GameError> {
        self.roulette.place_bet(&mut self.player, key, amount)
    }

    pub fn clear_roulette_bets(&mut self) -> Result<u64, GameError> {
        self.roulette.clear_bets(&mut self.player)
    }

    pub fn spin_roulette(&mut self) -> Result<(), GameError> {
        let now = self.clock.now();
        self.roulette.spin(now)
    }

    // Poker

    /// Start a new hand. Rejected while a hand is still live.
    pub fn deal_poker(&mut self) -> Result<(), GameError> {
        if let Some(hand) = &self.poker {
            if hand.result().is_none() {
                return Err(GameError::RoundInProgress);
            }
        }
        let hand = HeadsUpPoker::deal(&mut self.player, &mut self.rng)?;
        self.poker = Some(hand);
        self.poker_recorded = false;
        Ok(())
    }

    fn poker_mut(&mut self) -> Result<&mut HeadsUpPoker, GameError> {
        self.poker.as_mut().ok_or(GameError::InvalidMove)
    }

    pub fn poker_check(&mut self) -> Result<(), GameError> {
        let now = self.clock.now();
        self.poker_mut()?.check(now)
    }

    pub fn poker_call(&mut self) -> Result<(), GameError> {
        let now = self.clock.now();
        let Self { poker, player, .. } = self;
        poker
            .as_mut()
            .ok_or(GameError::InvalidMove)?
            .call(player, now)
    }

    pub fn poker_raise(&mut self, amount: u64) -> Result<(), GameError> {
        let now = self.clock.now();
        let Self { poker, player, .. } = self;
        poker
            .as_mut()
            .ok_or(GameError::InvalidMove)?
            .raise(player, amount, now)
    }

    pub fn poker_fold(&mut self) -> Result<WorldEvent, GameError> {
        self.poker_mut()?.fold()?;
        self.poker_recorded = true;
        self.record(GameType::Poker, RoundOutcome::Loss);
        Ok(WorldEvent::HandFinished {
            result: HandResult::Loss,
            credited: 0,
        })
    }

    // Check-in

    /// Check in for the clock's current UTC day.
    pub fn check_in(&mut self) -> Result<CheckInReceipt, CheckInError> {
        let today = self.clock.now().date_naive();
        self.checkin.check_in(&mut self.player, today)
    }

    pub fn check_in_status(&self) -> CheckInStatus {
        let today: NaiveDate = self.clock.now().date_naive();
        self.checkin.status(today)
    }

    /// Settle everything that is due at the clock's current time.
    ///
    /// Errors inside individual games cannot occur here because each game is
    /// only settled when its own `ready` reports due.
    pub fn poll(&mut self) -> Vec<WorldEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();

        if self.slots.ready(now) {
            if let Ok(SpinOutcome { reels, outcome }) =
                self.slots.settle(&mut self.player, &mut self.rng, now)
            {
                self.record(GameType::Slots, outcome);
                events.push(WorldEvent::SlotsSettled { reels, outcome });
            }
        }

        if self.roulette.ready(now) {
            if let Ok(WheelOutcome { number, outcome }) =
                self.roulette.settle(&mut self.player, &mut self.rng, now)
            {
                self.record(GameType::Roulette, outcome);
                events.push(WorldEvent::RouletteSettled { number, outcome });
            }
        }

        if let Some(hand) = self.poker.as_mut() {
            if hand.ready(now) {
                if let Ok(Some(action)) = hand.poll(&mut self.player, &mut self.rng, now) {
                    events.push(WorldEvent::Opponent(action));
                }
            }
            if let (Some(result), false) = (hand.result(), self.poker_recorded) {
                let credited = hand.last_win();
                let outcome = match result {
                    HandResult::Win => RoundOutcome::Win(credited),
                    HandResult::Loss => RoundOutcome::Loss,
                    HandResult::Tie => RoundOutcome::Push(credited),
                };
                self.poker_recorded = true;
                self.record(GameType::Poker, outcome);
                events.push(WorldEvent::HandFinished { result, credited });
            }
        }

        events
    }
}
