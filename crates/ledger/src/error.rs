//! Ledger errors

use billing_core::CoinId;
use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Emission of {budget} coins is less than {population} users")]
    InsufficientBudget { budget: u64, population: usize },

    #[error("No users loaded")]
    EmptyPopulation,

    #[error("user named {0} not found")]
    UnknownIdentity(String),

    #[error("user named {user} doesn't have enough coins: available {available}, requested {requested}")]
    InsufficientBalance {
        user: String,
        available: u64,
        requested: u64,
    },

    #[error("Duplicate user name in roster: {0}")]
    DuplicateIdentity(String),

    #[error("Coin not found: {0}")]
    UnknownCoin(CoinId),

    #[error("Arithmetic overflow during {0}")]
    ArithmeticOverflow(&'static str),

    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),
}
