//! Contracts between the ledger engine, its storage, and its callers.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::ledger::ledger_model::{Holding, Portfolio, PortfolioSummary};
use crate::transactions::Transaction;
use crate::Result;

/// The holding side of a trade commit.
#[derive(Debug, Clone, PartialEq)]
pub enum HoldingChange {
    Upsert(Holding),
    Remove(String),
}

/// Everything a committed trade changes, applied by the repository as
/// one indivisible step. Either all three parts persist or none do.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeCommit {
    /// New aggregate row, balance already adjusted.
    pub summary: PortfolioSummary,
    pub holding: HoldingChange,
    pub transaction: Transaction,
}

/// Trait defining the contract for ledger storage operations.
///
/// Implementations must make `apply_trade`, `apply_reprice`, and
/// `reset` atomic (a storage transaction or equivalent).
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Reads the portfolio row, creating the initial one on first
    /// access for an unknown user.
    fn get_or_create_portfolio(&self, user_id: &str) -> Result<PortfolioSummary>;
    fn get_holding(&self, user_id: &str, symbol: &str) -> Result<Option<Holding>>;
    fn list_holdings(&self, user_id: &str) -> Result<Vec<Holding>>;
    /// Transactions ordered by creation time descending.
    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
    fn apply_trade(&self, user_id: &str, commit: &TradeCommit) -> Result<()>;
    fn apply_reprice(
        &self,
        user_id: &str,
        holdings: &[Holding],
        summary: &PortfolioSummary,
    ) -> Result<()>;
    /// Clears holdings and transactions and restores the portfolio row
    /// to the initial balance, atomically.
    fn reset(&self, user_id: &str, initial_balance: Decimal) -> Result<()>;
    fn list_user_ids(&self) -> Result<Vec<String>>;
    fn list_portfolio_summaries(&self) -> Result<Vec<PortfolioSummary>>;
}

/// Trait defining the contract for ledger engine operations.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Buys `quantity` shares of `symbol` at the cached current price.
    async fn buy(&self, user_id: &str, symbol: &str, quantity: i64) -> Result<Transaction>;
    /// Sells `quantity` shares of `symbol` at the cached current price.
    async fn sell(&self, user_id: &str, symbol: &str, quantity: i64) -> Result<Transaction>;
    /// Updates holdings matching `prices` and recomputes aggregates.
    /// No balance or transaction effects.
    async fn reprice(&self, user_id: &str, prices: &HashMap<String, Decimal>) -> Result<()>;
    /// Reprices every known portfolio from the current quote cache.
    async fn reprice_all(&self) -> Result<()>;
    /// Restores the portfolio to its initial state.
    async fn reset(&self, user_id: &str) -> Result<()>;
    async fn get_portfolio(&self, user_id: &str) -> Result<Portfolio>;
    async fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>>;
}
