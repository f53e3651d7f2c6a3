//! Billing RPC - request handling over the coin ledger
//!
//! This crate provides roster loading, the shared `BillingService`, the
//! JSON-RPC dispatcher and the `billing` binary.

pub mod response;
pub mod roster;
pub mod server;
pub mod service;

pub use response::{Response, Status};
pub use roster::{load_roster, RosterError};
pub use server::RpcServer;
pub use service::BillingService;
