//! Read-only queries over the ledger

use crate::error::LedgerError;
use crate::ledger::CoinLedger;
use crate::store::CoinEntry;
use billing_core::{CoinId, Transition, UserProfile};
use serde::Serialize;

/// Snapshot of one coin: owner plus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoinView {
    pub id: CoinId,
    pub owner: String,
    /// One `from ==> to` line per transition
    pub history: String,
    pub transitions: Vec<Transition>,
}

impl From<&CoinEntry> for CoinView {
    fn from(entry: &CoinEntry) -> Self {
        Self {
            id: entry.coin().id(),
            owner: entry.owner().to_string(),
            history: entry.coin().history_text(),
            transitions: entry.coin().history().to_vec(),
        }
    }
}

impl CoinLedger {
    /// Every user with its balance, in roster order
    pub fn list_users(&self) -> Vec<UserProfile> {
        self.roster.iter().map(|a| a.profile()).collect()
    }

    /// The coin with the most transitions.
    ///
    /// Ties go to the oldest coin. `None` when no coin exists.
    pub fn longest_history_coin(&self) -> Option<CoinView> {
        let mut best: Option<&CoinEntry> = None;
        for entry in self.store.iter() {
            match best {
                Some(b) if b.coin().history_len() >= entry.coin().history_len() => {}
                _ => best = Some(entry),
            }
        }
        best.map(CoinView::from)
    }

    pub fn coin(&self, id: &CoinId) -> Option<CoinView> {
        self.store.get(id).map(CoinView::from)
    }

    /// Ids of the coins `name` holds, oldest first
    pub fn coins_owned_by(&self, name: &str) -> Result<Vec<CoinId>, LedgerError> {
        if self.roster.get(name).is_none() {
            return Err(LedgerError::UnknownIdentity(name.to_string()));
        }
        Ok(self.store.owned_by(name).map(|e| e.coin().id()).collect())
    }
}
