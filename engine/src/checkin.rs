//! Daily check-in rewards.
//!
//! One check-in per UTC calendar day. Consecutive days build a streak, and
//! every fifth streak level adds a bonus to the base reward. The last
//! check-in date and streak are persisted through [`Storage`] so they
//! survive restarts.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use piggyworld_types::casino::{
    Player, CHECKIN_BASE_REWARD, CHECKIN_STREAK_BONUS, CHECKIN_STREAK_INTERVAL, KEY_CHECKIN_STREAK,
    KEY_LAST_CHECKIN,
};

use crate::storage::Storage;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckInError {
    #[error("already checked in today")]
    AlreadyCheckedIn,
}

/// Result of a successful check-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckInReceipt {
    pub streak: u32,
    pub reward: u64,
}

/// Current check-in state, read fresh from storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckInStatus {
    pub checked_in_today: bool,
    pub streak: u32,
    pub last: Option<NaiveDate>,
}

/// Streak-tracking check-in over a [`Storage`] backend.
#[derive(Debug)]
pub struct DailyCheckIn<S: Storage> {
    storage: S,
}

impl<S: Storage> DailyCheckIn<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn last_check_in(&self) -> Option<NaiveDate> {
        let raw = self.storage.get(KEY_LAST_CHECKIN)?;
        // Unparsable values are treated as absent.
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).ok()
    }

    fn streak(&self) -> u32 {
        self.storage
            .get(KEY_CHECKIN_STREAK)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }

    /// Reward for a given streak level: 10 base plus 5 per five consecutive
    /// days.
    pub fn reward_for_streak(streak: u32) -> u64 {
        CHECKIN_BASE_REWARD + u64::from(streak) / CHECKIN_STREAK_INTERVAL * CHECKIN_STREAK_BONUS
    }

    /// Check in for `today`, crediting the reward to `player`.
    ///
    /// The streak continues only if the last check-in was yesterday;
    /// otherwise it resets to 1.
    pub fn check_in(
        &mut self,
        player: &mut Player,
        today: NaiveDate,
    ) -> Result<CheckInReceipt, CheckInError> {
        let last = self.last_check_in();
        if last == Some(today) {
            return Err(CheckInError::AlreadyCheckedIn);
        }

        let streak = match last {
            Some(date) if date.succ_opt() == Some(today) => self.streak() + 1,
            _ => 1,
        };

        self.storage
            .put(KEY_LAST_CHECKIN, &today.format(DATE_FORMAT).to_string());
        self.storage.put(KEY_CHECKIN_STREAK, &streak.to_string());

        let reward = Self::reward_for_streak(streak);
        player.credit(reward);

        debug!(%today, streak, reward, "daily check-in");
        Ok(CheckInReceipt { streak, reward })
    }

    /// Current status as of `today`.
    pub fn status(&self, today: NaiveDate) -> CheckInStatus {
        let last = self.last_check_in();
        CheckInStatus {
            checked_in_today: last == Some(today),
            streak: self.streak(),
            last,
        }
    }
}
