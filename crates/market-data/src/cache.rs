//! Latest-quote cache.
//!
//! Trade execution reads prices from here instead of calling the
//! provider inline, so the price lookup never extends the portfolio
//! critical section. The refresh task replaces the snapshot wholesale.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::warn;
use rust_decimal::Decimal;

use crate::models::SymbolQuote;

#[derive(Default)]
pub struct QuoteCache {
    quotes: RwLock<HashMap<String, SymbolQuote>>,
}

impl QuoteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a fresh snapshot. Symbols absent from the batch drop
    /// out of the cache and become unpriced.
    ///
    /// A poisoned lock is recovered rather than skipped: the map swap
    /// cannot leave a half-written snapshot behind, and dropping the
    /// refresh would serve stale prices until the next tick.
    pub fn replace_all(&self, batch: Vec<SymbolQuote>) {
        let map: HashMap<String, SymbolQuote> = batch
            .into_iter()
            .map(|quote| (quote.symbol.clone(), quote))
            .collect();
        let mut quotes = self.quotes.write().unwrap_or_else(|poisoned| {
            warn!("Quote cache lock poisoned, recovering");
            poisoned.into_inner()
        });
        *quotes = map;
    }

    pub fn get(&self, symbol: &str) -> Option<SymbolQuote> {
        self.quotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(symbol)
            .cloned()
    }

    /// Current price for a symbol, if known and positive.
    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.get(symbol)
            .map(|quote| quote.current_price)
            .filter(|price| *price > Decimal::ZERO)
    }

    /// Symbol -> current price for every positively priced entry.
    pub fn price_map(&self) -> HashMap<String, Decimal> {
        self.quotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|quote| quote.current_price > Decimal::ZERO)
            .map(|quote| (quote.symbol.clone(), quote.current_price))
            .collect()
    }
}
