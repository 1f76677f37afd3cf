//! Price provider trait and implementations.

mod simulated;

pub use simulated::SimulatedPriceProvider;

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::SymbolQuote;

/// Source of current prices for a set of symbols.
///
/// A provider returns one quote per symbol it could price; symbols it
/// failed on are omitted from the batch rather than failing the whole
/// request. Callers must treat missing symbols as "no price known".
#[async_trait]
pub trait PriceProviderTrait: Send + Sync {
    async fn fetch_quotes(&self, symbols: &[String]) -> Result<Vec<SymbolQuote>, MarketDataError>;
}
