//! Billing Ledger - Coin ownership core
//!
//! This is the HEART of Billing. Every coin movement goes through this crate.
//!
//! # Key Types
//! - `LedgerStore`: Coin identity -> current owner, in creation order
//! - `Roster`: Users, ratings and derived balances
//! - `CoinLedger`: Roster + store behind one mutation boundary
//! - `apportion`: Rating-weighted integer split of an emission budget

pub mod apportion;
pub mod audit;
pub mod emission;
pub mod error;
pub mod ledger;
pub mod query;
pub mod roster;
pub mod store;
pub mod transfer;

pub use apportion::{apportion, Allocation};
pub use emission::{EmissionReport, UserAllocation};
pub use error::LedgerError;
pub use ledger::CoinLedger;
pub use query::CoinView;
pub use roster::{Account, Roster};
pub use store::{CoinEntry, LedgerStore};
pub use transfer::TransferReceipt;
