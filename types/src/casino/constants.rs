/// Starting chips for a fresh player (matches the mock wallet balance).
pub const STARTING_CHIPS: u64 = 1_000;

/// Minimum bet for slots and roulette.
pub const MIN_BET: u64 = 10;

/// Maximum bet for slots and roulette.
pub const MAX_BET: u64 = 100;

/// Bet adjustment step.
pub const BET_STEP: u64 = 10;

/// Number of past outcomes retained per game.
pub const HISTORY_LEN: usize = 10;

/// Chips deducted from the player when a poker hand is dealt (the blinds).
pub const BLIND_COST: u64 = 20;

/// Pot value right after the blinds are posted.
pub const INITIAL_POT: u64 = 30;

/// Outstanding bet facing the player preflop.
pub const INITIAL_BET: u64 = 10;

/// Minimum raise amount.
pub const MIN_RAISE: u64 = 20;

/// Maximum raise amount.
pub const MAX_RAISE: u64 = 100;

/// Fixed amount the opponent raises by.
pub const OPPONENT_RAISE: u64 = 20;

/// Base daily check-in reward.
pub const CHECKIN_BASE_REWARD: u64 = 10;

/// Streak length granting one bonus increment.
pub const CHECKIN_STREAK_INTERVAL: u64 = 5;

/// Bonus chips per completed streak interval.
pub const CHECKIN_STREAK_BONUS: u64 = 5;

/// Address returned by the stub wallet-connect endpoint.
pub const MOCK_WALLET_ADDRESS: &str = "0x1234...5678";

/// Balance returned by the stub wallet-connect endpoint.
pub const MOCK_WALLET_BALANCE: u64 = 1_000;

/// Storage key for the last check-in date (YYYY-MM-DD, UTC).
pub const KEY_LAST_CHECKIN: &str = "piggyWorldLastCheckIn";

/// Storage key for the check-in streak counter.
pub const KEY_CHECKIN_STREAK: &str = "piggyWorldCheckInStreak";
