//! Immutable trade records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            other => Err(format!("unknown transaction type: {other}")),
        }
    }
}

/// One executed trade. Created exactly once per committed buy or sell
/// and never mutated; only a full portfolio reset removes records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Creation-ordered unique id (UUID v7).
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub symbol: String,
    pub name: String,
    pub quantity: i64,
    /// Execution price: the current market price at commit time.
    pub price: Decimal,
    /// quantity x price.
    pub total: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        transaction_type: TransactionType,
        symbol: &str,
        name: &str,
        quantity: i64,
        price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            transaction_type,
            symbol: symbol.to_string(),
            name: name.to_string(),
            quantity,
            price,
            total: price * Decimal::from(quantity),
            timestamp: Utc::now(),
        }
    }

    /// Copy with monetary fields rounded for display.
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();
        out.price = out.price.round_dp(DISPLAY_DECIMAL_PRECISION);
        out.total = out.total.round_dp(DISPLAY_DECIMAL_PRECISION);
        out
    }
}
