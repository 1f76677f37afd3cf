//! Analytics view models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// One holding's share of the portfolio.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HoldingAllocation {
    pub symbol: String,
    pub name: String,
    pub invested: Decimal,
    pub current_value: Decimal,
    /// invested / totalInvested x 100 (0-100).
    pub weight: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
}

/// Portfolio analytics summary consumed by the analytics page.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalytics {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
    /// Allocations sorted by weight descending.
    pub allocations: Vec<HoldingAllocation>,
    pub best_performer: Option<HoldingAllocation>,
    pub worst_performer: Option<HoldingAllocation>,
}

impl HoldingAllocation {
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();
        out.invested = out.invested.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.current_value = out.current_value.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.weight = out.weight.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.profit_loss = out.profit_loss.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.profit_loss_percent = out.profit_loss_percent.round_dp(DISPLAY_DECIMAL_PRECISION);
        out
    }
}

impl PortfolioAnalytics {
    pub fn rounded(&self) -> Self {
        Self {
            total_invested: self.total_invested.round_dp(DISPLAY_DECIMAL_PRECISION),
            current_value: self.current_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            profit_loss: self.profit_loss.round_dp(DISPLAY_DECIMAL_PRECISION),
            profit_loss_percent: self.profit_loss_percent.round_dp(DISPLAY_DECIMAL_PRECISION),
            allocations: self.allocations.iter().map(HoldingAllocation::rounded).collect(),
            best_performer: self.best_performer.as_ref().map(HoldingAllocation::rounded),
            worst_performer: self.worst_performer.as_ref().map(HoldingAllocation::rounded),
        }
    }
}
