//! The ledger engine.
//!
//! Every command is a transition on one portfolio aggregate:
//! validate, compute the next state with the pure calculator, then
//! hand the repository a single atomic commit. Commands on the same
//! portfolio are serialized through a per-user async mutex; the price
//! is read from the quote cache before the critical section begins so
//! the lock is never held across a price fetch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::constants::INITIAL_BALANCE;
use crate::ledger::ledger_calculator::{
    buy_holding, portfolio_aggregates, reprice_holding, sell_holding,
};
use crate::ledger::ledger_errors::LedgerError;
use crate::ledger::ledger_model::{Holding, Portfolio};
use crate::ledger::ledger_traits::{
    HoldingChange, LedgerRepositoryTrait, LedgerServiceTrait, TradeCommit,
};
use crate::transactions::{Transaction, TransactionType};
use crate::Result;
use papertrade_market_data::{QuoteCache, SymbolQuote};

pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    quotes: Arc<QuoteCache>,
    /// One lock per portfolio; different users proceed concurrently.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl LedgerService {
    pub fn new(repository: Arc<dyn LedgerRepositoryTrait>, quotes: Arc<QuoteCache>) -> Self {
        Self {
            repository,
            quotes,
            locks: DashMap::new(),
        }
    }

    fn portfolio_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.locks.entry(user_id.to_string()).or_default().clone()
    }

    /// Cached quote for a symbol, rejected unless the price is known
    /// and positive.
    fn current_quote(&self, symbol: &str) -> Result<SymbolQuote> {
        self.quotes
            .get(symbol)
            .filter(|quote| quote.current_price > Decimal::ZERO)
            .ok_or_else(|| LedgerError::PriceUnavailable(symbol.to_string()).into())
    }

    fn validate_quantity(quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(LedgerError::InvalidQuantity(quantity).into());
        }
        Ok(())
    }

    /// Holdings with `updated` substituted in (or appended).
    fn merge_holding(mut holdings: Vec<Holding>, updated: Holding) -> Vec<Holding> {
        match holdings.iter_mut().find(|h| h.symbol == updated.symbol) {
            Some(slot) => *slot = updated,
            None => holdings.push(updated),
        }
        holdings
    }

    /// Reprices one portfolio under its lock. Holdings without a
    /// matching price are left unchanged.
    fn reprice_locked(&self, user_id: &str, prices: &HashMap<String, Decimal>) -> Result<()> {
        let summary = self.repository.get_or_create_portfolio(user_id)?;
        let holdings: Vec<Holding> = self
            .repository
            .list_holdings(user_id)?
            .iter()
            .map(|holding| match prices.get(&holding.symbol) {
                Some(price) => reprice_holding(holding, *price),
                None => holding.clone(),
            })
            .collect();

        let aggregates = portfolio_aggregates(&holdings);
        let summary = summary.with_aggregates(&aggregates);
        self.repository.apply_reprice(user_id, &holdings, &summary)
    }
}

#[async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn buy(&self, user_id: &str, symbol: &str, quantity: i64) -> Result<Transaction> {
        Self::validate_quantity(quantity)?;
        let quote = self.current_quote(symbol)?;
        let price = quote.current_price;
        let total = price * Decimal::from(quantity);

        let lock = self.portfolio_lock(user_id);
        let _guard = lock.lock().await;

        let summary = self.repository.get_or_create_portfolio(user_id)?;
        if total > summary.balance {
            return Err(LedgerError::InsufficientBalance {
                required: total,
                available: summary.balance,
            }
            .into());
        }

        let existing = self.repository.get_holding(user_id, symbol)?;
        let updated = buy_holding(existing.as_ref(), symbol, &quote.name, quantity, price);

        let holdings = Self::merge_holding(self.repository.list_holdings(user_id)?, updated.clone());
        let aggregates = portfolio_aggregates(&holdings);

        let mut summary = summary.with_aggregates(&aggregates);
        summary.balance -= total;

        let transaction =
            Transaction::new(TransactionType::Buy, symbol, &quote.name, quantity, price);
        let commit = TradeCommit {
            summary,
            holding: HoldingChange::Upsert(updated),
            transaction: transaction.clone(),
        };
        self.repository.apply_trade(user_id, &commit)?;

        debug!("User {user_id} bought {quantity} {symbol} at {price}");
        Ok(transaction)
    }

    async fn sell(&self, user_id: &str, symbol: &str, quantity: i64) -> Result<Transaction> {
        Self::validate_quantity(quantity)?;
        let quote = self.current_quote(symbol)?;
        let price = quote.current_price;

        let lock = self.portfolio_lock(user_id);
        let _guard = lock.lock().await;

        let summary = self.repository.get_or_create_portfolio(user_id)?;
        let holding = self
            .repository
            .get_holding(user_id, symbol)?
            .ok_or_else(|| LedgerError::NoSuchHolding(symbol.to_string()))?;
        if quantity > holding.quantity {
            return Err(LedgerError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                held: holding.quantity,
            }
            .into());
        }

        let outcome = sell_holding(&holding, quantity, price);

        let mut holdings = self.repository.list_holdings(user_id)?;
        match &outcome.remaining {
            Some(remaining) => holdings = Self::merge_holding(holdings, remaining.clone()),
            None => holdings.retain(|h| h.symbol != symbol),
        }
        let aggregates = portfolio_aggregates(&holdings);

        let mut summary = summary.with_aggregates(&aggregates);
        summary.balance += outcome.proceeds;

        let transaction =
            Transaction::new(TransactionType::Sell, symbol, &holding.name, quantity, price);
        let commit = TradeCommit {
            summary,
            holding: match outcome.remaining {
                Some(remaining) => HoldingChange::Upsert(remaining),
                None => HoldingChange::Remove(symbol.to_string()),
            },
            transaction: transaction.clone(),
        };
        self.repository.apply_trade(user_id, &commit)?;

        debug!("User {user_id} sold {quantity} {symbol} at {price}");
        Ok(transaction)
    }

    async fn reprice(&self, user_id: &str, prices: &HashMap<String, Decimal>) -> Result<()> {
        let lock = self.portfolio_lock(user_id);
        let _guard = lock.lock().await;
        self.reprice_locked(user_id, prices)
    }

    async fn reprice_all(&self) -> Result<()> {
        let prices = self.quotes.price_map();
        if prices.is_empty() {
            return Ok(());
        }
        for user_id in self.repository.list_user_ids()? {
            let lock = self.portfolio_lock(&user_id);
            let _guard = lock.lock().await;
            self.reprice_locked(&user_id, &prices)?;
        }
        Ok(())
    }

    async fn reset(&self, user_id: &str) -> Result<()> {
        let lock = self.portfolio_lock(user_id);
        let _guard = lock.lock().await;
        self.repository
            .reset(user_id, Decimal::from(INITIAL_BALANCE))?;
        debug!("User {user_id} reset their portfolio");
        Ok(())
    }

    async fn get_portfolio(&self, user_id: &str) -> Result<Portfolio> {
        let lock = self.portfolio_lock(user_id);
        let _guard = lock.lock().await;
        let summary = self.repository.get_or_create_portfolio(user_id)?;
        let holdings = self.repository.list_holdings(user_id)?;
        let transactions = self.repository.list_transactions(user_id)?;
        Ok(Portfolio::assemble(&summary, holdings, transactions))
    }

    async fn get_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repository.list_transactions(user_id)
    }
}
