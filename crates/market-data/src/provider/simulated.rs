//! Simulated price provider.
//!
//! Generates a plausible daily picture per symbol: yesterday's close as
//! a random walk off the listing's base price, today's price as a walk
//! off yesterday, and a next-day prediction mixing momentum with mean
//! reversion toward the base price. Prices are floored at 1.00 and
//! quoted to two decimals, matching what a real feed would deliver.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::catalog::stock_listing;
use crate::errors::MarketDataError;
use crate::models::SymbolQuote;
use crate::provider::PriceProviderTrait;

/// Price floor so the walk can never produce a non-positive price.
const MIN_PRICE: Decimal = Decimal::ONE;

/// Fraction helper: basis points to a decimal fraction.
fn bps(value: i64) -> Decimal {
    Decimal::new(value, 4)
}

pub struct SimulatedPriceProvider {
    rng: Mutex<StdRng>,
}

impl SimulatedPriceProvider {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic provider for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn generate_quote(&self, rng: &mut StdRng, symbol: &str) -> Option<SymbolQuote> {
        let listing = stock_listing(symbol)?;
        let base = listing.base_price();

        // Yesterday: -2%..+2% off the base price.
        let yesterday_variation = bps(rng.gen_range(-200..=200));
        let yesterday = (base * (Decimal::ONE + yesterday_variation)).max(MIN_PRICE);

        // Today: -1.5%..+1.5% off yesterday.
        let today_variation = bps(rng.gen_range(-150..=150));
        let current = (yesterday * (Decimal::ONE + today_variation)).max(MIN_PRICE);

        let previous_close = yesterday;
        let change = current - previous_close;
        let change_percent = change / previous_close * Decimal::ONE_HUNDRED;

        // Intraday band from realized volatility.
        let volatility = today_variation.abs() * Decimal::new(15, 1);
        let high = current * (Decimal::ONE + volatility);
        let low = (current * (Decimal::ONE - volatility)).max(MIN_PRICE);
        let open = (yesterday * (Decimal::ONE + bps(rng.gen_range(-50..=50)))).max(MIN_PRICE);

        // Tomorrow: 50% momentum continuation, 30% mean reversion
        // toward the base price, plus noise.
        let momentum = today_variation * Decimal::new(5, 1);
        let mean_reversion = (base - current) / base * Decimal::new(3, 1);
        let noise = bps(rng.gen_range(-100..=100));
        let tomorrow_predicted =
            (current * (Decimal::ONE + momentum + mean_reversion + noise)).max(MIN_PRICE);

        let volume = rng.gen_range(1_000_000..=6_000_000);

        Some(SymbolQuote {
            symbol: listing.symbol.to_string(),
            name: listing.name.to_string(),
            current_price: current.round_dp(2),
            previous_close: previous_close.round_dp(2),
            change: change.round_dp(2),
            change_percent: change_percent.round_dp(2),
            open: open.round_dp(2),
            high: high.round_dp(2),
            low: low.round_dp(2),
            volume,
            yesterday_price: yesterday.round_dp(2),
            tomorrow_predicted: tomorrow_predicted.round_dp(2),
            timestamp: Utc::now(),
        })
    }
}

impl Default for SimulatedPriceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProviderTrait for SimulatedPriceProvider {
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<SymbolQuote>, MarketDataError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| MarketDataError::Provider("rng mutex poisoned".to_string()))?;

        let mut quotes = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            match self.generate_quote(&mut rng, symbol) {
                Some(quote) => quotes.push(quote),
                None => debug!("No listing for symbol {symbol}, skipping quote"),
            }
        }
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::stock_universe;
    use rust_decimal_macros::dec;

    fn all_symbols() -> Vec<String> {
        stock_universe()
            .iter()
            .map(|l| l.symbol.to_string())
            .collect()
    }

    #[tokio::test]
    async fn quotes_cover_known_symbols_and_skip_unknown() {
        let provider = SimulatedPriceProvider::with_seed(7);
        let mut symbols = all_symbols();
        symbols.push("NOT_A_STOCK".to_string());

        let quotes = provider.fetch_quotes(&symbols).await.unwrap();
        assert_eq!(quotes.len(), stock_universe().len());
        assert!(quotes.iter().all(|q| q.symbol != "NOT_A_STOCK"));
    }

    #[tokio::test]
    async fn prices_stay_within_walk_bounds() {
        let provider = SimulatedPriceProvider::with_seed(42);
        let quotes = provider.fetch_quotes(&all_symbols()).await.unwrap();

        for quote in &quotes {
            let base = stock_listing(&quote.symbol).unwrap().base_price();
            assert!(quote.current_price >= Decimal::ONE);
            assert!(quote.low <= quote.current_price);
            assert!(quote.high >= quote.current_price);
            // Two walks of at most 2% and 1.5% keep the price within
            // roughly 4% of base.
            let drift = ((quote.current_price - base) / base).abs();
            assert!(drift < dec!(0.04), "drift {drift} too large for {}", quote.symbol);
        }
    }

    #[tokio::test]
    async fn change_fields_are_consistent() {
        let provider = SimulatedPriceProvider::with_seed(3);
        let quotes = provider.fetch_quotes(&all_symbols()).await.unwrap();

        for quote in &quotes {
            let expected = (quote.current_price - quote.previous_close).round_dp(2);
            // change is rounded from unrounded intermediates, allow a cent.
            assert!((quote.change - expected).abs() <= dec!(0.01));
        }
    }
}
