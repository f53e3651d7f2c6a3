//! Ledger store - coin identity to current owner
//!
//! Coins are kept in creation order. That order is the ledger's iteration
//! order and the selection order for transfers (oldest first).

use crate::error::LedgerError;
use billing_core::{Coin, CoinId};
use std::collections::HashMap;

/// A coin together with its current owner
#[derive(Debug, Clone)]
pub struct CoinEntry {
    coin: Coin,
    owner: String,
}

impl CoinEntry {
    pub fn coin(&self) -> &Coin {
        &self.coin
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}

/// Append-only coin store with an id index
#[derive(Debug, Default)]
pub struct LedgerStore {
    entries: Vec<CoinEntry>,
    index: HashMap<CoinId, usize>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new coin for `owner` and insert it.
    ///
    /// Ids that already exist in the store are regenerated, so every id is
    /// unique for the lifetime of the store.
    pub fn mint(&mut self, owner: &str) -> CoinId {
        let coin = loop {
            let coin = Coin::emit(owner);
            if !self.index.contains_key(&coin.id()) {
                break coin;
            }
        };
        let id = coin.id();
        self.index.insert(id, self.entries.len());
        self.entries.push(CoinEntry {
            coin,
            owner: owner.to_string(),
        });
        id
    }

    /// Move a coin to `to`, appending `current ==> to` to its history.
    ///
    /// Does not touch any balance; callers keep the roster in step.
    pub fn reassign(&mut self, id: CoinId, to: &str) -> Result<(), LedgerError> {
        let pos = *self.index.get(&id).ok_or(LedgerError::UnknownCoin(id))?;
        self.reassign_at(pos, to);
        Ok(())
    }

    /// Reassign the `count` oldest coins of `owner` to `to`.
    ///
    /// Returns the moved ids, oldest first. Fewer than `count` ids come back
    /// only if `owner` holds fewer coins.
    pub(crate) fn move_oldest(&mut self, owner: &str, to: &str, count: usize) -> Vec<CoinId> {
        let positions: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.owner == owner)
            .take(count)
            .map(|(pos, _)| pos)
            .collect();

        positions
            .into_iter()
            .map(|pos| {
                self.reassign_at(pos, to);
                self.entries[pos].coin.id()
            })
            .collect()
    }

    fn reassign_at(&mut self, pos: usize, to: &str) {
        let entry = &mut self.entries[pos];
        let from = std::mem::replace(&mut entry.owner, to.to_string());
        entry.coin.record_transfer(&from, to);
    }

    pub fn get(&self, id: &CoinId) -> Option<&CoinEntry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// All coins in creation order
    pub fn iter(&self) -> impl Iterator<Item = &CoinEntry> {
        self.entries.iter()
    }

    /// Coins currently held by `owner`, in creation order
    pub fn owned_by<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a CoinEntry> + 'a {
        self.entries.iter().filter(move |e| e.owner == owner)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_and_lookup() {
        let mut store = LedgerStore::new();
        let id = store.mint("ALICE");

        let entry = store.get(&id).unwrap();
        assert_eq!(entry.owner(), "ALICE");
        assert_eq!(entry.coin().history_text(), "Emission ==> ALICE\n");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reassign_appends_history() {
        let mut store = LedgerStore::new();
        let id = store.mint("ALICE");

        store.reassign(id, "BOB").unwrap();
        let entry = store.get(&id).unwrap();
        assert_eq!(entry.owner(), "BOB");
        assert_eq!(entry.coin().history_len(), 2);
        assert_eq!(
            entry.coin().history_text(),
            "Emission ==> ALICE\nALICE ==> BOB\n"
        );
    }

    #[test]
    fn test_reassign_unknown_coin() {
        let mut store = LedgerStore::new();
        let missing = CoinId::new();
        assert_eq!(
            store.reassign(missing, "BOB"),
            Err(LedgerError::UnknownCoin(missing))
        );
    }

    #[test]
    fn test_move_oldest_selects_in_creation_order() {
        let mut store = LedgerStore::new();
        let a1 = store.mint("ALICE");
        let _b1 = store.mint("BOB");
        let a2 = store.mint("ALICE");
        let a3 = store.mint("ALICE");

        let moved = store.move_oldest("ALICE", "BOB", 2);
        assert_eq!(moved, vec![a1, a2]);
        assert_eq!(store.owned_by("ALICE").count(), 1);
        assert_eq!(store.owned_by("ALICE").next().unwrap().coin().id(), a3);
        assert_eq!(store.owned_by("BOB").count(), 3);
    }

    #[test]
    fn test_iteration_is_creation_order() {
        let mut store = LedgerStore::new();
        let ids: Vec<CoinId> = ["A", "B", "C"].iter().map(|o| store.mint(o)).collect();
        let iterated: Vec<CoinId> = store.iter().map(|e| e.coin().id()).collect();
        assert_eq!(ids, iterated);
    }
}
