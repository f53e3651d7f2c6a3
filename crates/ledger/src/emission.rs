//! Emission - mint a budget of coins across the roster by rating

use crate::apportion::apportion;
use crate::error::LedgerError;
use crate::ledger::CoinLedger;
use billing_core::CoinId;
use serde::Serialize;
use tracing::{debug, info};

/// Coins handed to one user by an emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAllocation {
    pub name: String,
    pub coins: u64,
}

/// Result of a successful emission
#[derive(Debug, Clone, Serialize)]
pub struct EmissionReport {
    pub budget: u64,
    /// In materialization order (floored users first)
    pub allocations: Vec<UserAllocation>,
    /// Ids of the minted coins, in creation order
    pub coins: Vec<CoinId>,
}

impl EmissionReport {
    pub fn coins_for(&self, name: &str) -> Option<u64> {
        self.allocations
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.coins)
    }
}

impl CoinLedger {
    /// Emit `budget` new coins across every user in the roster.
    ///
    /// Fails with `EmptyPopulation` when the roster is empty and with
    /// `InsufficientBudget` when `budget` is less than the number of users.
    /// On failure the ledger is unchanged.
    pub fn emit(&mut self, budget: u64) -> Result<EmissionReport, LedgerError> {
        let ratings: Vec<u64> = self.roster.iter().map(|a| a.rating()).collect();
        let plan = apportion(budget, &ratings)?;
        let total_emitted = self
            .total_emitted
            .checked_add(budget)
            .ok_or(LedgerError::ArithmeticOverflow("total emitted"))?;

        let mut report = EmissionReport {
            budget,
            allocations: Vec::with_capacity(plan.len()),
            coins: Vec::new(),
        };

        for allocation in plan {
            let name = self.roster.account(allocation.index).name().to_string();
            self.roster.credit(allocation.index, allocation.coins);
            for _ in 0..allocation.coins {
                let id = self.store.mint(&name);
                debug!(coin = %id, user = %name, "Create coin");
                report.coins.push(id);
            }
            report.allocations.push(UserAllocation {
                name,
                coins: allocation.coins,
            });
        }

        self.total_emitted = total_emitted;
        info!(
            budget,
            users = report.allocations.len(),
            total_emitted,
            "Coins distributed"
        );

        Ok(report)
    }
}
