//! SQLite implementation of the ledger repository.
//!
//! Only the canonical position fields (quantity, average price, last
//! price, invested capital) are stored; derived values are recomputed
//! from them on every read so the database can never drift.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use log::debug;
use papertrade_core::ledger::{
    reprice_holding, Holding, HoldingChange, LedgerRepositoryTrait, PortfolioSummary, TradeCommit,
};
use papertrade_core::transactions::{Transaction, TransactionType};
use papertrade_core::Result;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::errors::{IntoCoreError, StorageError};

pub struct SqliteLedgerRepository {
    conn: Mutex<Connection>,
}

impl SqliteLedgerRepository {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::ConnectionPoisoned.into())
    }
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn datetime_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<PortfolioSummary> {
    Ok(PortfolioSummary {
        user_id: row.get(0)?,
        balance: decimal_column(row, 1)?,
        total_invested: decimal_column(row, 2)?,
        current_value: decimal_column(row, 3)?,
        profit_loss: decimal_column(row, 4)?,
        profit_loss_percent: decimal_column(row, 5)?,
    })
}

fn holding_from_row(row: &Row<'_>) -> rusqlite::Result<Holding> {
    let stored = Holding {
        symbol: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        avg_price: decimal_column(row, 3)?,
        current_price: decimal_column(row, 4)?,
        invested: decimal_column(row, 5)?,
        current_value: Decimal::ZERO,
        profit_loss: Decimal::ZERO,
        profit_loss_percent: Decimal::ZERO,
    };
    let price = stored.current_price;
    Ok(reprice_holding(&stored, price))
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let type_text: String = row.get(1)?;
    let transaction_type = TransactionType::from_str(&type_text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into()))?;
    Ok(Transaction {
        id: row.get(0)?,
        transaction_type,
        symbol: row.get(2)?,
        name: row.get(3)?,
        quantity: row.get(4)?,
        price: decimal_column(row, 5)?,
        total: decimal_column(row, 6)?,
        timestamp: datetime_column(row, 7)?,
    })
}

/// Reads the portfolio row, inserting the initial one if absent. Runs
/// against either a plain connection or an open transaction.
fn ensure_portfolio(conn: &Connection, user_id: &str) -> rusqlite::Result<PortfolioSummary> {
    let existing = conn
        .query_row(
            "SELECT user_id, balance, total_invested, current_value, profit_loss,
                    profit_loss_percent
             FROM portfolios WHERE user_id = ?1",
            params![user_id],
            summary_from_row,
        )
        .optional()?;

    if let Some(summary) = existing {
        return Ok(summary);
    }

    debug!("Provisioning initial portfolio for user {user_id}");
    let summary = PortfolioSummary::initial(user_id);
    conn.execute(
        "INSERT INTO portfolios (user_id, balance, total_invested, current_value,
                                 profit_loss, profit_loss_percent, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            summary.user_id,
            summary.balance.to_string(),
            summary.total_invested.to_string(),
            summary.current_value.to_string(),
            summary.profit_loss.to_string(),
            summary.profit_loss_percent.to_string(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(summary)
}

fn update_summary(conn: &Connection, summary: &PortfolioSummary) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE portfolios
         SET balance = ?2, total_invested = ?3, current_value = ?4,
             profit_loss = ?5, profit_loss_percent = ?6
         WHERE user_id = ?1",
        params![
            summary.user_id,
            summary.balance.to_string(),
            summary.total_invested.to_string(),
            summary.current_value.to_string(),
            summary.profit_loss.to_string(),
            summary.profit_loss_percent.to_string(),
        ],
    )?;
    Ok(())
}

fn upsert_holding(conn: &Connection, user_id: &str, holding: &Holding) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO holdings (user_id, symbol, name, quantity, avg_price,
                               current_price, invested)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT (user_id, symbol) DO UPDATE SET
             name = excluded.name,
             quantity = excluded.quantity,
             avg_price = excluded.avg_price,
             current_price = excluded.current_price,
             invested = excluded.invested",
        params![
            user_id,
            holding.symbol,
            holding.name,
            holding.quantity,
            holding.avg_price.to_string(),
            holding.current_price.to_string(),
            holding.invested.to_string(),
        ],
    )?;
    Ok(())
}

impl LedgerRepositoryTrait for SqliteLedgerRepository {
    fn get_or_create_portfolio(&self, user_id: &str) -> Result<PortfolioSummary> {
        let conn = self.conn()?;
        ensure_portfolio(&conn, user_id).into_core()
    }

    fn get_holding(&self, user_id: &str, symbol: &str) -> Result<Option<Holding>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT symbol, name, quantity, avg_price, current_price, invested
             FROM holdings WHERE user_id = ?1 AND symbol = ?2",
            params![user_id, symbol],
            holding_from_row,
        )
        .optional()
        .into_core()
    }

    fn list_holdings(&self, user_id: &str) -> Result<Vec<Holding>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT symbol, name, quantity, avg_price, current_price, invested
                 FROM holdings WHERE user_id = ?1 ORDER BY symbol",
            )
            .into_core()?;
        let rows = stmt
            .query_map(params![user_id], holding_from_row)
            .into_core()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_core()
    }

    fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, type, symbol, name, quantity, price, total, created_at
                 FROM transactions WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )
            .into_core()?;
        let rows = stmt
            .query_map(params![user_id], transaction_from_row)
            .into_core()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_core()
    }

    fn apply_trade(&self, user_id: &str, commit: &TradeCommit) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().into_core()?;

        update_summary(&tx, &commit.summary).into_core()?;
        match &commit.holding {
            HoldingChange::Upsert(holding) => upsert_holding(&tx, user_id, holding).into_core()?,
            HoldingChange::Remove(symbol) => {
                tx.execute(
                    "DELETE FROM holdings WHERE user_id = ?1 AND symbol = ?2",
                    params![user_id, symbol],
                )
                .into_core()?;
            }
        }

        let record = &commit.transaction;
        tx.execute(
            "INSERT INTO transactions (id, user_id, type, symbol, name, quantity,
                                       price, total, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.id,
                user_id,
                record.transaction_type.as_str(),
                record.symbol,
                record.name,
                record.quantity,
                record.price.to_string(),
                record.total.to_string(),
                record.timestamp.to_rfc3339(),
            ],
        )
        .into_core()?;

        tx.commit().into_core()
    }

    fn apply_reprice(
        &self,
        user_id: &str,
        holdings: &[Holding],
        summary: &PortfolioSummary,
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().into_core()?;

        for holding in holdings {
            tx.execute(
                "UPDATE holdings SET current_price = ?3
                 WHERE user_id = ?1 AND symbol = ?2",
                params![user_id, holding.symbol, holding.current_price.to_string()],
            )
            .into_core()?;
        }
        update_summary(&tx, summary).into_core()?;

        tx.commit().into_core()
    }

    fn reset(&self, user_id: &str, initial_balance: Decimal) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().into_core()?;

        ensure_portfolio(&tx, user_id).into_core()?;
        tx.execute(
            "DELETE FROM transactions WHERE user_id = ?1",
            params![user_id],
        )
        .into_core()?;
        tx.execute("DELETE FROM holdings WHERE user_id = ?1", params![user_id])
            .into_core()?;
        tx.execute(
            "UPDATE portfolios
             SET balance = ?2, total_invested = '0', current_value = '0',
                 profit_loss = '0', profit_loss_percent = '0'
             WHERE user_id = ?1",
            params![user_id, initial_balance.to_string()],
        )
        .into_core()?;

        tx.commit().into_core()
    }

    fn list_user_ids(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT user_id FROM portfolios ORDER BY user_id")
            .into_core()?;
        let rows = stmt.query_map([], |row| row.get(0)).into_core()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_core()
    }

    fn list_portfolio_summaries(&self) -> Result<Vec<PortfolioSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT user_id, balance, total_invested, current_value, profit_loss,
                        profit_loss_percent
                 FROM portfolios ORDER BY user_id",
            )
            .into_core()?;
        let rows = stmt.query_map([], summary_from_row).into_core()?;
        rows.collect::<rusqlite::Result<Vec<_>>>().into_core()
    }
}
