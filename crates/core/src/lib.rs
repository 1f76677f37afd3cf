//! Papertrade Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger engine for the trading simulator.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod allocation;
pub mod constants;
pub mod errors;
pub mod leaderboard;
pub mod ledger;
pub mod transactions;

// Re-export common types from the ledger and transaction modules
pub use ledger::*;
pub use transactions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
