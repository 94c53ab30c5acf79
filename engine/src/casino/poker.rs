//! Heads-up poker ("Piggy Hold'em").
//!
//! A simplified hold'em hand against a scripted opponent. Stages advance
//! strictly forward; `fold` short-circuits to `End` from any non-terminal
//! stage. The opponent responds a fixed delay after every non-fold player
//! action, branching on fixed probabilities rather than hand strength, and
//! the showdown winner is drawn at random (45% player / 45% opponent / 10%
//! tie) without comparing cards. Both simplifications are product intent.
//!
//! One original quirk is preserved: a player `call` leaves the current bet
//! outstanding until the opponent responds.

use chrono::{DateTime, Duration, Utc};
use piggyworld_types::casino::{
    Player, BLIND_COST, INITIAL_BET, INITIAL_POT, MAX_RAISE, MIN_RAISE, OPPONENT_RAISE,
};
use tracing::debug;

use super::{card_label, GameError, GameRng, OPPONENT_DELAY_MS};

/// Betting stages, strictly linear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    End,
}

/// Final result of a hand, from the player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandResult {
    Win,
    Loss,
    Tie,
}

/// Opponent response fired by [`HeadsUpPoker::poll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpponentMove {
    Checked,
    Called { amount: u64 },
    Raised { to: u64 },
}

/// State of one heads-up hand.
#[derive(Clone, Debug)]
pub struct HeadsUpPoker {
    deck: Vec<u8>,
    player_hand: [u8; 2],
    opponent_hand: [u8; 2],
    opponent_revealed: bool,
    community: Vec<u8>,
    pot: u64,
    current_bet: u64,
    stage: Stage,
    player_turn: bool,
    opponent_due: Option<DateTime<Utc>>,
    result: Option<HandResult>,
    last_win: u64,
}

impl HeadsUpPoker {
    /// Shuffle, deal and post the blinds: pot 30, current bet 10, and 20
    /// chips deducted from the player.
    pub fn deal(player: &mut Player, rng: &mut GameRng) -> Result<Self, GameError> {
        player.debit(BLIND_COST)?;

        let mut deck = rng.create_deck();
        let mut draw = || rng.draw_card(&mut deck).ok_or(GameError::DeckExhausted);
        let player_hand = [draw()?, draw()?];
        let opponent_hand = [draw()?, draw()?];

        debug!(
            player_hand = %format!("{} {}", card_label(player_hand[0]), card_label(player_hand[1])),
            "hand dealt"
        );

        Ok(Self {
            deck,
            player_hand,
            opponent_hand,
            opponent_revealed: false,
            community: Vec::with_capacity(5),
            pot: INITIAL_POT,
            current_bet: INITIAL_BET,
            stage: Stage::Preflop,
            player_turn: true,
            opponent_due: None,
            result: None,
            last_win: 0,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn player_hand(&self) -> [u8; 2] {
        self.player_hand
    }

    /// Opponent cards, visible only after the showdown reveal.
    pub fn opponent_hand(&self) -> Option<[u8; 2]> {
        self.opponent_revealed.then_some(self.opponent_hand)
    }

    pub fn community(&self) -> &[u8] {
        &self.community
    }

    pub fn result(&self) -> Option<HandResult> {
        self.result
    }

    /// Chips credited by the last showdown (full pot on a win, half on a
    /// tie).
    pub fn last_win(&self) -> u64 {
        self.last_win
    }

    pub fn is_player_turn(&self) -> bool {
        self.player_turn && self.opponent_due.is_none() && self.stage < Stage::Showdown
    }

    /// Whether the opponent's pending response is due at `now`.
    pub fn ready(&self, now: DateTime<Utc>) -> bool {
        self.opponent_due.map(|due| now >= due).unwrap_or(false)
    }

    fn ensure_player_turn(&self) -> Result<(), GameError> {
        if self.stage >= Stage::Showdown {
            return Err(GameError::HandComplete);
        }
        if !self.player_turn || self.opponent_due.is_some() {
            return Err(GameError::InvalidMove);
        }
        Ok(())
    }

    fn schedule_opponent(&mut self, now: DateTime<Utc>) {
        self.player_turn = false;
        self.opponent_due = Some(now + Duration::milliseconds(OPPONENT_DELAY_MS));
    }

    /// Check. Illegal while a bet is outstanding.
    pub fn check(&mut self, now: DateTime<Utc>) -> Result<(), GameError> {
        self.ensure_player_turn()?;
        if self.current_bet > 0 {
            return Err(GameError::InvalidMove);
        }
        self.schedule_opponent(now);
        Ok(())
    }

    /// Call the outstanding bet into the pot. The bet stays outstanding
    /// until the opponent responds.
    pub fn call(&mut self, player: &mut Player, now: DateTime<Utc>) -> Result<(), GameError> {
        self.ensure_player_turn()?;
        if self.current_bet == 0 {
            return Err(GameError::InvalidMove);
        }
        player.debit(self.current_bet)?;
        self.pot += self.current_bet;
        self.schedule_opponent(now);
        Ok(())
    }

    /// Raise by `amount` (MIN_RAISE..=MAX_RAISE). The outstanding bet
    /// becomes the amount over the previous bet.
    pub fn raise(
        &mut self,
        player: &mut Player,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<(), GameError> {
        self.ensure_player_turn()?;
        if !(MIN_RAISE..=MAX_RAISE).contains(&amount) {
            return Err(GameError::InvalidBet);
        }
        player.debit(amount)?;
        self.pot += amount;
        self.current_bet = amount.saturating_sub(self.current_bet);
        self.schedule_opponent(now);
        Ok(())
    }

    /// Fold: the hand ends immediately and the opponent takes the pot.
    /// Opponent chips are not tracked, so nothing is credited anywhere.
    pub fn fold(&mut self) -> Result<(), GameError> {
        if self.stage >= Stage::Showdown {
            return Err(GameError::HandComplete);
        }
        self.opponent_due = None;
        self.player_turn = false;
        self.result = Some(HandResult::Loss);
        self.stage = Stage::End;
        debug!("player folded");
        Ok(())
    }

    /// Fire the opponent's due response, if any.
    ///
    /// With no outstanding bet the opponent checks 70% of the time (the
    /// stage advances) and raises otherwise; facing a bet it calls 80% of
    /// the time (stage advances) and re-raises otherwise.
    pub fn poll(
        &mut self,
        player: &mut Player,
        rng: &mut GameRng,
        now: DateTime<Utc>,
    ) -> Result<Option<OpponentMove>, GameError> {
        let Some(due) = self.opponent_due else {
            return Ok(None);
        };
        if now < due {
            return Ok(None);
        }
        self.opponent_due = None;

        if self.stage >= Stage::Showdown {
            return Ok(None);
        }

        let roll = rng.next_f32();
        let action = if self.current_bet == 0 {
            if roll < 0.7 {
                self.advance(player, rng)?;
                OpponentMove::Checked
            } else {
                self.pot += OPPONENT_RAISE;
                self.current_bet = OPPONENT_RAISE;
                self.player_turn = true;
                OpponentMove::Raised { to: OPPONENT_RAISE }
            }
        } else if roll < 0.8 {
            let amount = self.current_bet;
            self.pot += amount;
            self.current_bet = 0;
            self.advance(player, rng)?;
            OpponentMove::Called { amount }
        } else {
            let to = self.current_bet + OPPONENT_RAISE;
            self.pot += to;
            self.current_bet = to - self.current_bet;
            self.player_turn = true;
            OpponentMove::Raised { to }
        };

        debug!(?action, stage = ?self.stage, pot = self.pot, "opponent acted");
        Ok(Some(action))
    }

    fn draw(&mut self, rng: &mut GameRng) -> Result<u8, GameError> {
        rng.draw_card(&mut self.deck).ok_or(GameError::DeckExhausted)
    }

    /// Advance to the next street, dealing community cards; reaching the
    /// river's advance resolves the showdown.
    fn advance(&mut self, player: &mut Player, rng: &mut GameRng) -> Result<(), GameError> {
        match self.stage {
            Stage::Preflop => {
                for _ in 0..3 {
                    let card = self.draw(rng)?;
                    self.community.push(card);
                }
                self.stage = Stage::Flop;
            }
            Stage::Turn | Stage::Flop => {
                let card = self.draw(rng)?;
                self.community.push(card);
                self.stage = if self.stage == Stage::Flop {
                    Stage::Turn
                } else {
                    Stage::River
                };
            }
            Stage::River => {
                self.stage = Stage::Showdown;
                self.resolve_showdown(player, rng);
                return Ok(());
            }
            Stage::Showdown | Stage::End => return Err(GameError::HandComplete),
        }
        self.current_bet = 0;
        self.player_turn = true;
        Ok(())
    }

    /// Reveal and pick a winner at random: 45% player, 45% opponent, 10%
    /// tie. Card values are never compared.
    fn resolve_showdown(&mut self, player: &mut Player, rng: &mut GameRng) {
        self.opponent_revealed = true;

        let roll = rng.next_f32();
        let result = if roll < 0.45 {
            self.last_win = self.pot;
            player.credit(self.pot);
            HandResult::Win
        } else if roll < 0.9 {
            self.last_win = 0;
            HandResult::Loss
        } else {
            self.last_win = self.pot / 2;
            player.credit(self.pot / 2);
            HandResult::Tie
        };

        self.result = Some(result);
        self.stage = Stage::End;
        debug!(?result, pot = self.pot, credited = self.last_win, "showdown resolved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::start_time;
    use piggyworld_types::casino::STARTING_CHIPS;

    fn opponent_time(start: DateTime<Utc>) -> DateTime<Utc> {
        start + Duration::milliseconds(OPPONENT_DELAY_MS)
    }

    fn deal(seed: u64) -> (Player, HeadsUpPoker, GameRng) {
        let mut player = Player::new("Test".to_string());
        let mut rng = GameRng::from_seed(seed);
        let hand = HeadsUpPoker::deal(&mut player, &mut rng).expect("deal succeeds");
        (player, hand, rng)
    }

    /// Drive the hand to completion: the player always calls or checks.
    fn run_to_end(
        player: &mut Player,
        hand: &mut HeadsUpPoker,
        rng: &mut GameRng,
        mut now: DateTime<Utc>,
    ) {
        for _ in 0..200 {
            if hand.stage() == Stage::End {
                return;
            }
            if hand.is_player_turn() {
                if hand.current_bet() > 0 {
                    hand.call(player, now).expect("call is legal");
                } else {
                    hand.check(now).expect("check is legal");
                }
            }
            now = opponent_time(now);
            hand.poll(player, rng, now).expect("poll succeeds");
        }
        panic!("hand did not complete in 200 steps");
    }

    #[test]
    fn test_deal_posts_blinds() {
        let (player, hand, _) = deal(1);
        assert_eq!(player.chips, STARTING_CHIPS - BLIND_COST);
        assert_eq!(hand.pot(), INITIAL_POT);
        assert_eq!(hand.current_bet(), INITIAL_BET);
        assert_eq!(hand.stage(), Stage::Preflop);
        assert!(hand.is_player_turn());
        assert!(hand.opponent_hand().is_none());
        assert!(hand.community().is_empty());
    }

    #[test]
    fn test_deal_rejected_when_broke() {
        let mut player = Player::new("Test".to_string());
        player
            .debit(STARTING_CHIPS - BLIND_COST + 1)
            .expect("leave 19 chips");
        let mut rng = GameRng::from_seed(1);
        let result = HeadsUpPoker::deal(&mut player, &mut rng);
        assert!(matches!(result, Err(GameError::InsufficientChips(_))));
    }

    #[test]
    fn test_dealt_cards_are_distinct() {
        let (_, hand, _) = deal(2);
        let mut cards = vec![hand.player_hand[0], hand.player_hand[1]];
        cards.extend_from_slice(&hand.opponent_hand);
        cards.sort_unstable();
        cards.dedup();
        assert_eq!(cards.len(), 4);
        assert_eq!(hand.deck.len(), 48);
    }

    #[test]
    fn test_check_illegal_facing_bet() {
        let (_, mut hand, _) = deal(3);
        // Preflop the player faces the initial bet of 10.
        assert_eq!(hand.check(start_time()), Err(GameError::InvalidMove));
    }

    #[test]
    fn test_call_moves_bet_into_pot() {
        let (mut player, mut hand, _) = deal(4);
        let now = start_time();
        hand.call(&mut player, now).expect("call is legal");
        assert_eq!(player.chips, STARTING_CHIPS - BLIND_COST - INITIAL_BET);
        assert_eq!(hand.pot(), INITIAL_POT + INITIAL_BET);
        // The bet stays outstanding until the opponent responds.
        assert_eq!(hand.current_bet(), INITIAL_BET);
        assert!(!hand.is_player_turn());
    }

    #[test]
    fn test_actions_blocked_while_opponent_pending() {
        let (mut player, mut hand, _) = deal(5);
        let now = start_time();
        hand.call(&mut player, now).expect("call is legal");
        assert_eq!(
            hand.call(&mut player, now),
            Err(GameError::InvalidMove)
        );
        assert_eq!(
            hand.raise(&mut player, 20, now),
            Err(GameError::InvalidMove)
        );
    }

    #[test]
    fn test_raise_validation_and_arithmetic() {
        let (mut player, mut hand, _) = deal(6);
        let now = start_time();
        assert_eq!(
            hand.raise(&mut player, 10, now),
            Err(GameError::InvalidBet)
        );
        assert_eq!(
            hand.raise(&mut player, 110, now),
            Err(GameError::InvalidBet)
        );

        hand.raise(&mut player, 40, now).expect("raise is legal");
        assert_eq!(player.chips, STARTING_CHIPS - BLIND_COST - 40);
        assert_eq!(hand.pot(), INITIAL_POT + 40);
        // 40 raised over the outstanding 10.
        assert_eq!(hand.current_bet(), 30);
    }

    #[test]
    fn test_fold_ends_hand_without_credit() {
        // Fold must short-circuit to End from every non-terminal stage.
        let (mut player, mut hand, _) = deal(7);
        let chips_before = player.chips;
        hand.fold().expect("fold is legal");
        assert_eq!(hand.stage(), Stage::End);
        assert_eq!(hand.result(), Some(HandResult::Loss));
        assert_eq!(player.chips, chips_before);

        // Folding a finished hand is rejected.
        assert_eq!(hand.fold(), Err(GameError::HandComplete));
    }

    #[test]
    fn test_fold_legal_mid_hand() {
        // Walk a hand forward to a later street, then fold.
        for seed in 0..100 {
            let (mut player, mut hand, mut rng) = deal(seed);
            let mut now = start_time();
            for _ in 0..20 {
                if hand.stage() >= Stage::Showdown {
                    break;
                }
                if hand.stage() > Stage::Preflop {
                    let chips_before = player.chips;
                    hand.fold().expect("fold is legal mid-hand");
                    assert_eq!(hand.stage(), Stage::End);
                    assert_eq!(player.chips, chips_before);
                    return;
                }
                if hand.is_player_turn() {
                    if hand.current_bet() > 0 {
                        hand.call(&mut player, now).expect("call is legal");
                    } else {
                        hand.check(now).expect("check is legal");
                    }
                }
                now = opponent_time(now);
                hand.poll(&mut player, &mut rng, now).expect("poll succeeds");
            }
        }
        panic!("no hand reached a post-preflop stage");
    }

    #[test]
    fn test_poll_before_due_is_noop() {
        let (mut player, mut hand, mut rng) = deal(8);
        let now = start_time();
        hand.call(&mut player, now).expect("call is legal");
        let response = hand
            .poll(&mut player, &mut rng, now)
            .expect("poll succeeds");
        assert_eq!(response, None);
        // Still pending
        assert!(!hand.is_player_turn());
    }

    #[test]
    fn test_opponent_call_advances_and_clears_bet() {
        for seed in 0..100 {
            let (mut player, mut hand, mut rng) = deal(seed);
            let now = start_time();
            hand.call(&mut player, now).expect("call is legal");
            let response = hand
                .poll(&mut player, &mut rng, opponent_time(now))
                .expect("poll succeeds");
            if let Some(OpponentMove::Called { amount }) = response {
                assert_eq!(amount, INITIAL_BET);
                assert_eq!(hand.stage(), Stage::Flop);
                assert_eq!(hand.community().len(), 3);
                assert_eq!(hand.current_bet(), 0);
                assert!(hand.is_player_turn());
                return;
            }
        }
        panic!("opponent never called in 100 seeded hands");
    }

    #[test]
    fn test_opponent_reraise_returns_turn() {
        for seed in 0..200 {
            let (mut player, mut hand, mut rng) = deal(seed);
            let now = start_time();
            hand.call(&mut player, now).expect("call is legal");
            let pot_before = hand.pot();
            let response = hand
                .poll(&mut player, &mut rng, opponent_time(now))
                .expect("poll succeeds");
            if let Some(OpponentMove::Raised { to }) = response {
                assert_eq!(to, INITIAL_BET + OPPONENT_RAISE);
                assert_eq!(hand.pot(), pot_before + to);
                assert_eq!(hand.current_bet(), OPPONENT_RAISE);
                assert_eq!(hand.stage(), Stage::Preflop);
                assert!(hand.is_player_turn());
                return;
            }
        }
        panic!("opponent never re-raised in 200 seeded hands");
    }

    #[test]
    fn test_river_advance_resolves_showdown() {
        let mut win_seen = false;
        let mut loss_seen = false;
        let mut tie_seen = false;

        for seed in 0..300 {
            let (mut player, mut hand, mut rng) = deal(seed);
            run_to_end(&mut player, &mut hand, &mut rng, start_time());

            assert_eq!(hand.stage(), Stage::End);
            assert!(hand.opponent_hand().is_some());
            assert_eq!(hand.community().len(), 5);

            match hand.result().expect("hand resolved") {
                HandResult::Win => {
                    assert_eq!(hand.last_win(), hand.pot());
                    win_seen = true;
                }
                HandResult::Loss => {
                    assert_eq!(hand.last_win(), 0);
                    loss_seen = true;
                }
                HandResult::Tie => {
                    assert_eq!(hand.last_win(), hand.pot() / 2);
                    tie_seen = true;
                }
            }
        }

        assert!(win_seen, "no win in 300 hands");
        assert!(loss_seen, "no loss in 300 hands");
        assert!(tie_seen, "no tie in 300 hands");
    }

    #[test]
    fn test_full_hand_conserves_chips() {
        for seed in 0..100 {
            let mut player = Player::new("Test".to_string());
            player.credit(100_000);
            let mut rng = GameRng::from_seed(seed);
            let chips_before = player.chips;

            let mut hand = HeadsUpPoker::deal(&mut player, &mut rng).expect("deal succeeds");
            let mut contributed = BLIND_COST;
            let mut now = start_time();

            for _ in 0..200 {
                if hand.stage() == Stage::End {
                    break;
                }
                if hand.is_player_turn() {
                    if hand.current_bet() > 0 {
                        contributed += hand.current_bet();
                        hand.call(&mut player, now).expect("call is legal");
                    } else {
                        hand.check(now).expect("check is legal");
                    }
                }
                now = opponent_time(now);
                hand.poll(&mut player, &mut rng, now).expect("poll succeeds");
            }

            assert_eq!(hand.stage(), Stage::End);
            assert_eq!(player.chips, chips_before - contributed + hand.last_win());
        }
    }

    #[test]
    fn test_actions_rejected_after_end() {
        let (mut player, mut hand, _) = deal(9);
        hand.fold().expect("fold is legal");
        let now = start_time();
        assert_eq!(hand.check(now), Err(GameError::HandComplete));
        assert_eq!(hand.call(&mut player, now), Err(GameError::HandComplete));
        assert_eq!(
            hand.raise(&mut player, 20, now),
            Err(GameError::HandComplete)
        );
    }
}
