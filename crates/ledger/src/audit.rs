//! Ledger audit - re-derive every invariant from the coin store

use crate::error::LedgerError;
use crate::ledger::CoinLedger;
use billing_core::Party;
use std::collections::HashMap;

impl CoinLedger {
    /// Check the ledger against its invariants.
    ///
    /// - every coin's owner is a roster member
    /// - every history starts with an emission to a roster member
    /// - each transition starts where the previous one ended, and the last
    ///   one ends at the current owner
    /// - each user's balance equals the number of coins it owns
    /// - the coin count equals the total emitted
    pub fn verify(&self) -> Result<(), LedgerError> {
        let mut owned: HashMap<&str, u64> = HashMap::new();

        for entry in self.store.iter() {
            let coin = entry.coin();
            if self.roster.get(entry.owner()).is_none() {
                return Err(violation(format!(
                    "coin {} owned by unknown user {}",
                    coin.id(),
                    entry.owner()
                )));
            }

            let history = coin.history();
            let Some(first) = history.first() else {
                return Err(violation(format!("coin {} has no history", coin.id())));
            };
            if first.from != Party::Emission || self.roster.get(&first.to).is_none() {
                return Err(violation(format!(
                    "coin {} does not start with an emission: {}",
                    coin.id(),
                    first
                )));
            }

            for pair in history.windows(2) {
                if pair[1].from != Party::User(pair[0].to.clone()) {
                    return Err(violation(format!(
                        "coin {} history is broken between '{}' and '{}'",
                        coin.id(),
                        pair[0],
                        pair[1]
                    )));
                }
            }

            let last = &history[history.len() - 1];
            if last.to != entry.owner() {
                return Err(violation(format!(
                    "coin {} history ends at {} but owner is {}",
                    coin.id(),
                    last.to,
                    entry.owner()
                )));
            }

            *owned.entry(entry.owner()).or_insert(0) += 1;
        }

        for account in self.roster.iter() {
            let count = owned.get(account.name()).copied().unwrap_or(0);
            if count != account.balance() {
                return Err(violation(format!(
                    "user {} has balance {} but owns {} coins",
                    account.name(),
                    account.balance(),
                    count
                )));
            }
        }

        if self.store.len() as u64 != self.total_emitted {
            return Err(violation(format!(
                "{} coins exist but {} were emitted",
                self.store.len(),
                self.total_emitted
            )));
        }

        Ok(())
    }
}

fn violation(detail: String) -> LedgerError {
    LedgerError::InvariantViolation(detail)
}
