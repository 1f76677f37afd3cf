//! Ledger module - portfolio state, trade arithmetic, and the engine
//! that applies buy/sell/reprice/reset commands atomically.

mod ledger_calculator;
mod ledger_errors;
mod ledger_model;
mod ledger_service;
mod ledger_traits;


#[cfg(test)]
mod ledger_service_tests;

pub use ledger_calculator::{
    buy_holding, portfolio_aggregates, reprice_holding, sell_holding, SellOutcome,
};
pub use ledger_errors::LedgerError;
pub use ledger_model::{Holding, Portfolio, PortfolioAggregates, PortfolioSummary};
pub use ledger_service::LedgerService;
pub use ledger_traits::{HoldingChange, LedgerRepositoryTrait, LedgerServiceTrait, TradeCommit};
