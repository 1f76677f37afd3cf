//! Database initialization.

use log::info;
use papertrade_core::errors::{DatabaseError, Error};
use papertrade_core::Result;
use rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS portfolios (
    user_id             TEXT PRIMARY KEY,
    balance             TEXT NOT NULL,
    total_invested      TEXT NOT NULL,
    current_value       TEXT NOT NULL,
    profit_loss         TEXT NOT NULL,
    profit_loss_percent TEXT NOT NULL,
    created_at          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS holdings (
    user_id       TEXT NOT NULL,
    symbol        TEXT NOT NULL,
    name          TEXT NOT NULL,
    quantity      INTEGER NOT NULL CHECK (quantity > 0),
    avg_price     TEXT NOT NULL,
    current_price TEXT NOT NULL,
    invested      TEXT NOT NULL,
    PRIMARY KEY (user_id, symbol),
    FOREIGN KEY (user_id) REFERENCES portfolios (user_id)
);

CREATE TABLE IF NOT EXISTS transactions (
    id         TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL,
    type       TEXT NOT NULL CHECK (type IN ('BUY', 'SELL')),
    symbol     TEXT NOT NULL,
    name       TEXT NOT NULL,
    quantity   INTEGER NOT NULL CHECK (quantity > 0),
    price      TEXT NOT NULL,
    total      TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES portfolios (user_id)
);

CREATE INDEX IF NOT EXISTS idx_transactions_user_created
    ON transactions (user_id, created_at DESC);
";

/// Opens (or creates) the database at `path` and ensures the schema
/// exists. Pass `":memory:"` for an in-memory database.
pub fn init(path: &str) -> Result<Connection> {
    let conn = if path == ":memory:" {
        Connection::open_in_memory()
    } else {
        Connection::open(path)
    }
    .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|e| Error::Database(DatabaseError::ConnectionFailed(e.to_string())))?;
    conn.execute_batch(SCHEMA)
        .map_err(|e| Error::Database(DatabaseError::MigrationFailed(e.to_string())))?;

    info!("Database ready at {path}");
    Ok(conn)
}
