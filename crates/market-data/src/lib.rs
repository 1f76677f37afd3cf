//! Papertrade Market Data Crate
//!
//! Provider-agnostic price data for the trading simulator. The crate
//! defines the quote models, the provider trait, the simulated provider
//! used in production, and the in-process quote cache that trade
//! execution reads from.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     Catalog      |  (fixed stock universe)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (SimulatedPriceProvider, or a real feed)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   QuoteCache     |  (latest snapshot, read before trades)
//! +------------------+
//! ```

pub mod cache;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod provider;

pub use cache::QuoteCache;
pub use catalog::{stock_listing, stock_universe, StockListing};
pub use errors::MarketDataError;
pub use models::{Stock, SymbolQuote};
pub use provider::{PriceProviderTrait, SimulatedPriceProvider};
