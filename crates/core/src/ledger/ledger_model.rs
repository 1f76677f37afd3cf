//! Portfolio state models.
//!
//! All monetary fields carry full `Decimal` precision internally;
//! rounding to two decimals happens only in the `rounded()` view
//! helpers called at the presentation boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_DECIMAL_PRECISION, INITIAL_BALANCE};
use crate::transactions::Transaction;

/// A position in one symbol.
///
/// `invested` is tracked as an independent running value rather than
/// recomputed from `avg_price * quantity`, so partial sells can
/// apportion cost proportionally without rounding drift.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    /// Whole shares, always > 0 for a stored holding.
    pub quantity: i64,
    /// Weighted average cost per share. Recomputed on buys, invariant
    /// across sells.
    pub avg_price: Decimal,
    /// Last observed market price.
    pub current_price: Decimal,
    /// Cost basis currently at risk in this position.
    pub invested: Decimal,
    /// quantity x current_price.
    pub current_value: Decimal,
    /// current_value - invested.
    pub profit_loss: Decimal,
    /// profit_loss / invested x 100, zero when invested is zero.
    pub profit_loss_percent: Decimal,
}

impl Holding {
    /// Copy with monetary fields rounded for display.
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();
        out.avg_price = out.avg_price.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.current_price = out.current_price.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.invested = out.invested.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.current_value = out.current_value.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.profit_loss = out.profit_loss.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.profit_loss_percent = out.profit_loss_percent.round_dp(DISPLAY_DECIMAL_PRECISION);
        out
    }
}

/// The stored portfolio aggregate row: cash plus derived totals.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub user_id: String,
    pub balance: Decimal,
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
}

impl PortfolioSummary {
    /// Fresh portfolio at the initial cash balance.
    pub fn initial(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            balance: Decimal::from(INITIAL_BALANCE),
            total_invested: Decimal::ZERO,
            current_value: Decimal::ZERO,
            profit_loss: Decimal::ZERO,
            profit_loss_percent: Decimal::ZERO,
        }
    }

    /// Replaces the derived totals from freshly summed holdings.
    pub fn with_aggregates(mut self, aggregates: &PortfolioAggregates) -> Self {
        self.total_invested = aggregates.total_invested;
        self.current_value = aggregates.current_value;
        self.profit_loss = aggregates.profit_loss;
        self.profit_loss_percent = aggregates.profit_loss_percent;
        self
    }
}

/// Derived portfolio totals, always recomputed from the full holding
/// set after an operation so the stored aggregates cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioAggregates {
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
}

/// Full portfolio view: aggregate fields plus holdings and the
/// transaction log, newest first.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub balance: Decimal,
    pub total_invested: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percent: Decimal,
    pub holdings: Vec<Holding>,
    pub transactions: Vec<Transaction>,
}

impl Portfolio {
    pub fn assemble(
        summary: &PortfolioSummary,
        holdings: Vec<Holding>,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            balance: summary.balance,
            total_invested: summary.total_invested,
            current_value: summary.current_value,
            profit_loss: summary.profit_loss,
            profit_loss_percent: summary.profit_loss_percent,
            holdings,
            transactions,
        }
    }

    /// Copy with every monetary field rounded for display.
    pub fn rounded(&self) -> Self {
        Self {
            balance: self.balance.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_invested: self.total_invested.round_dp(DISPLAY_DECIMAL_PRECISION),
            current_value: self.current_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            profit_loss: self.profit_loss.round_dp(DISPLAY_DECIMAL_PRECISION),
            profit_loss_percent: self.profit_loss_percent.round_dp(DISPLAY_DECIMAL_PRECISION),
            holdings: self.holdings.iter().map(Holding::rounded).collect(),
            transactions: self.transactions.iter().map(Transaction::rounded).collect(),
        }
    }
}
