/// Starting cash balance for every portfolio, in currency units.
pub const INITIAL_BALANCE: i64 = 100_000;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Maximum number of entries returned by the leaderboard
pub const LEADERBOARD_LIMIT: usize = 50;
