//! Roster - users, ratings and balances
//!
//! Loaded once at start-up. Only balances change afterwards.

use crate::error::LedgerError;
use billing_core::{Person, UserProfile};
use std::collections::HashMap;

/// A roster member with its current coin balance
#[derive(Debug, Clone)]
pub struct Account {
    person: Person,
    balance: u64,
}

impl Account {
    pub fn name(&self) -> &str {
        self.person.name()
    }

    pub fn rating(&self) -> u64 {
        self.person.rating()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name().to_string(),
            amount: self.balance,
        }
    }
}

/// Ordered set of accounts, unique by name
#[derive(Debug, Default)]
pub struct Roster {
    accounts: Vec<Account>,
    by_name: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster, keeping input order. Names must be unique.
    pub fn new(people: impl IntoIterator<Item = Person>) -> Result<Self, LedgerError> {
        let mut roster = Self::default();
        for person in people {
            if roster.by_name.contains_key(person.name()) {
                return Err(LedgerError::DuplicateIdentity(person.name().to_string()));
            }
            roster
                .by_name
                .insert(person.name().to_string(), roster.accounts.len());
            roster.accounts.push(Account { person, balance: 0 });
        }
        Ok(roster)
    }

    pub fn get(&self, name: &str) -> Option<&Account> {
        self.index_of(name).map(|idx| &self.accounts[idx])
    }

    pub fn balance(&self, name: &str) -> Option<u64> {
        self.get(name).map(Account::balance)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub(crate) fn account(&self, idx: usize) -> &Account {
        &self.accounts[idx]
    }

    pub(crate) fn credit(&mut self, idx: usize, coins: u64) {
        self.accounts[idx].balance += coins;
    }

    /// Caller must have checked the balance covers `coins`
    pub(crate) fn debit(&mut self, idx: usize, coins: u64) {
        self.accounts[idx].balance -= coins;
    }
}
