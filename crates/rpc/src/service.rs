//! Billing service - shared ledger behind one lock
//!
//! Emission and transfer take the write lock, so they are serialized and a
//! balance check cannot be raced past. Queries share the read lock and only
//! ever see a fully applied operation.

use billing_core::UserProfile;
use billing_ledger::{CoinLedger, CoinView, LedgerError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::response::Response;

#[derive(Clone)]
pub struct BillingService {
    ledger: Arc<RwLock<CoinLedger>>,
}

impl BillingService {
    pub fn new(ledger: CoinLedger) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Snapshot of every user's balance, in roster order
    pub async fn list_users(&self) -> Vec<UserProfile> {
        let users = self.ledger.read().await.list_users();
        info!("list users query");
        users
    }

    /// Emit `amount` coins across the roster
    pub async fn coins_emission(&self, amount: u64) -> Response {
        let result = self.ledger.write().await.emit(amount);
        match result {
            Ok(_) => Response::ok("Coins distributed successfully."),
            Err(e) => {
                warn!(amount, error = %e, "Emission rejected");
                Response::failed(failure_comment(&e))
            }
        }
    }

    /// Move `amount` coins from `src_user` to `dst_user`
    pub async fn move_coins(&self, src_user: &str, dst_user: &str, amount: u64) -> Response {
        let result = self.ledger.write().await.transfer(src_user, dst_user, amount);
        match result {
            Ok(_) => Response::ok(format!(
                "User named {} transferred {} coins to a user named {}",
                src_user, amount, dst_user
            )),
            Err(e) => {
                warn!(src_user, dst_user, amount, error = %e, "Transfer rejected");
                Response::failed(failure_comment(&e))
            }
        }
    }

    /// The coin with the longest provenance trail, if any coin exists
    pub async fn longest_history_coin(&self) -> Option<CoinView> {
        info!("Longest history coin query");
        self.ledger.read().await.longest_history_coin()
    }

    /// Audit the ledger invariants
    pub async fn verify_ledger(&self) -> Response {
        let ledger = self.ledger.read().await;
        match ledger.verify() {
            Ok(()) => Response::ok(format!(
                "Ledger verified: {} coins across {} users",
                ledger.total_coins(),
                ledger.roster().len()
            )),
            Err(e) => Response::failed(e.to_string()),
        }
    }
}

fn failure_comment(error: &LedgerError) -> String {
    match error {
        LedgerError::InsufficientBudget { .. } => "Quantity of coins is less than users.".to_string(),
        LedgerError::EmptyPopulation => "No users to distribute coins to.".to_string(),
        LedgerError::UnknownIdentity(name) => format!("user named {} not found", name),
        LedgerError::InsufficientBalance { user, .. } => {
            format!("user named {} doesn't have enough coins", user)
        }
        other => other.to_string(),
    }
}
