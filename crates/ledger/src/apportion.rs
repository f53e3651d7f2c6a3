//! Apportionment - split an integer coin budget by rating
//!
//! Cumulative-share rounding: member *k* gets
//! `round(R_k * budget / R) - D_{k-1}` where `R_k` is the running rating sum
//! and `D_{k-1}` the coins already handed out in this walk. Every prefix is
//! within half a coin of its exact share and the last member closes the sum
//! exactly, so nothing leaks.
//!
//! Floor guarantee: a member whose share comes out below one coin is given
//! exactly one coin and leaves the pool. The rest of the budget is walked
//! again over the remaining members. Walks repeat until one triggers no
//! floor; that walk is the final distribution.

use crate::error::LedgerError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Coins assigned to one member, by position in the input population
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub index: usize,
    pub coins: u64,
}

/// Outcome of one cumulative walk
struct Walk {
    floored: Vec<usize>,
    kept: Vec<Allocation>,
}

/// Split `budget` across `ratings`.
///
/// Allocations come back in materialization order: members floored in the
/// first walk, then members floored in later walks, then the final walk in
/// input order. Every member appears exactly once with `coins >= 1` and the
/// coins sum to `budget`.
pub fn apportion(budget: u64, ratings: &[u64]) -> Result<Vec<Allocation>, LedgerError> {
    if ratings.is_empty() {
        return Err(LedgerError::EmptyPopulation);
    }
    if budget < ratings.len() as u64 {
        return Err(LedgerError::InsufficientBudget {
            budget,
            population: ratings.len(),
        });
    }

    let mut plan = Vec::with_capacity(ratings.len());
    let mut pending: Vec<usize> = (0..ratings.len()).collect();
    let mut remaining = budget;

    // remaining >= pending.len() holds across walks, so the last pending
    // member can never be floored when everyone before it was.
    loop {
        let pass = walk(remaining, &pending, ratings)?;
        if pass.floored.is_empty() {
            plan.extend(pass.kept);
            return Ok(plan);
        }

        remaining -= pass.floored.len() as u64;
        plan.extend(pass.floored.iter().map(|&index| Allocation { index, coins: 1 }));
        pending = pass.kept.iter().map(|a| a.index).collect();
    }
}

fn walk(budget: u64, members: &[usize], ratings: &[u64]) -> Result<Walk, LedgerError> {
    let total_weight = members
        .iter()
        .try_fold(0u64, |acc, &i| acc.checked_add(ratings[i]))
        .ok_or(LedgerError::ArithmeticOverflow("rating sum"))?;

    let mut cumulative_weight = 0u64;
    let mut distributed: i128 = 0;
    let mut pass = Walk {
        floored: Vec::new(),
        kept: Vec::with_capacity(members.len()),
    };

    for &index in members {
        cumulative_weight += ratings[index];
        let target = rounded_share(cumulative_weight, budget, total_weight)?;
        let share = target - distributed;

        if share < 1 {
            pass.floored.push(index);
            distributed += 1;
        } else {
            pass.kept.push(Allocation {
                index,
                coins: share as u64,
            });
            distributed += share;
        }
    }

    Ok(pass)
}

/// `round(cumulative * budget / total)`, half to even
fn rounded_share(cumulative: u64, budget: u64, total: u64) -> Result<i128, LedgerError> {
    Decimal::from(cumulative)
        .checked_mul(Decimal::from(budget))
        .and_then(|product| product.checked_div(Decimal::from(total)))
        .map(|exact| exact.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_i128())
        .ok_or(LedgerError::ArithmeticOverflow("share calculation"))
}
