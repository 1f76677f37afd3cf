//! Ledger repository backed by SQLite.

mod ledger_repository;


pub use ledger_repository::SqliteLedgerRepository;
