//! Typed rejection reasons for ledger commands.

use rust_decimal::Decimal;
use thiserror::Error;

/// A command the ledger refused. No state is mutated when one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance: trade costs {required} but only {available} is available")]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
    },

    #[error("Insufficient shares of {symbol}: requested {requested}, holding {held}")]
    InsufficientShares {
        symbol: String,
        requested: i64,
        held: i64,
    },

    #[error("No holding for symbol {0}")]
    NoSuchHolding(String),

    #[error("No current price available for {0}")]
    PriceUnavailable(String),

    #[error("Invalid quantity: {0} (must be a positive whole number)")]
    InvalidQuantity(i64),
}
