//! SQLite storage implementation for papertrade.
//!
//! This crate is the only place in the application where rusqlite
//! appears. It implements the repository traits defined in
//! `papertrade-core`; everything above it is database-agnostic.
//!
//! Monetary values are stored as TEXT so decimals round-trip exactly;
//! quantities are INTEGER; timestamps are RFC 3339 TEXT.

pub mod db;
pub mod errors;
pub mod ledger;

pub use ledger::SqliteLedgerRepository;
