//! Transaction log module.

mod transactions_model;

pub use transactions_model::{Transaction, TransactionType};
