use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// One ranked row on the leaderboard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// 1-based position, best profit first.
    pub rank: u32,
    pub user_id: String,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
}

impl LeaderboardEntry {
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();
        out.current_value = out.current_value.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.profit_loss = out.profit_loss.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.profit_loss_percent = out.profit_loss_percent.round_dp(DISPLAY_DECIMAL_PRECISION);
        out
    }
}
