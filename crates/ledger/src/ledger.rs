//! Coin ledger - roster and coin store behind one mutation boundary
//!
//! Operations live next to their engines:
//! - emission: [`CoinLedger::emit`]
//! - transfer: [`CoinLedger::transfer`]
//! - queries: [`CoinLedger::longest_history_coin`], [`CoinLedger::list_users`]
//! - audit: [`CoinLedger::verify`]
//!
//! Every mutating operation validates fully before it touches state.

use crate::error::LedgerError;
use crate::roster::Roster;
use crate::store::LedgerStore;
use billing_core::Person;

/// Roster plus coin store.
///
/// # Invariants
/// - `balance(user) == store.owned_by(user).count()` for every user
/// - `store.len() == total_emitted`
#[derive(Debug, Default)]
pub struct CoinLedger {
    pub(crate) roster: Roster,
    pub(crate) store: LedgerStore,
    pub(crate) total_emitted: u64,
}

impl CoinLedger {
    /// Create an empty ledger over the given users
    pub fn new(people: impl IntoIterator<Item = Person>) -> Result<Self, LedgerError> {
        Ok(Self {
            roster: Roster::new(people)?,
            store: LedgerStore::new(),
            total_emitted: 0,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Sum of all successful emissions since start-up
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted
    }

    pub fn total_coins(&self) -> usize {
        self.store.len()
    }
}
