//! Market data error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider failed to produce a quote batch. Individual
    /// unpriceable symbols are omitted from the batch instead.
    #[error("Provider error: {0}")]
    Provider(String),
}
