//! Quote and stock view models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::StockListing;

/// A single price observation for one symbol.
///
/// Symbols the provider failed on are simply absent from a batch;
/// consumers treat absence as "no price known".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolQuote {
    pub symbol: String,
    pub name: String,
    pub current_price: Decimal,
    pub previous_close: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub volume: u64,
    /// Advisory only, not used in ledger math.
    pub yesterday_price: Decimal,
    /// Advisory only, not used in ledger math.
    pub tomorrow_predicted: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Market-list view model consumed by the UI.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub current_price: Decimal,
    pub previous_price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub volume: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yesterday_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tomorrow_predicted: Option<Decimal>,
}

impl Stock {
    /// Builds the view from a fresh quote.
    pub fn from_quote(quote: &SymbolQuote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            current_price: quote.current_price,
            previous_price: quote.previous_close,
            change: quote.change,
            change_percent: quote.change_percent,
            volume: quote.volume,
            yesterday_price: Some(quote.yesterday_price),
            tomorrow_predicted: Some(quote.tomorrow_predicted),
        }
    }

    /// Placeholder row for a listing with no quote yet. A zero price
    /// means the symbol is not tradable until a quote arrives.
    pub fn unpriced(listing: &StockListing) -> Self {
        Self {
            symbol: listing.symbol.to_string(),
            name: listing.name.to_string(),
            current_price: Decimal::ZERO,
            previous_price: Decimal::ZERO,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            volume: listing.volume,
            yesterday_price: None,
            tomorrow_predicted: None,
        }
    }
}
