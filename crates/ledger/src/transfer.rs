//! Transfer - move coins between users, oldest coins first

use crate::error::LedgerError;
use crate::ledger::CoinLedger;
use billing_core::CoinId;
use serde::Serialize;
use tracing::{debug, info};

/// Result of a successful transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub from: String,
    pub to: String,
    /// Moved coin ids, oldest first. Empty for a no-op transfer.
    pub moved: Vec<CoinId>,
}

impl CoinLedger {
    /// Move `count` coins from `from` to `to`.
    ///
    /// The source's oldest coins move first and each gains a
    /// `from ==> to` record. A transfer to oneself or of zero coins is
    /// validated and then does nothing.
    pub fn transfer(
        &mut self,
        from: &str,
        to: &str,
        count: u64,
    ) -> Result<TransferReceipt, LedgerError> {
        let src = self
            .roster
            .index_of(from)
            .ok_or_else(|| LedgerError::UnknownIdentity(from.to_string()))?;
        let dst = self
            .roster
            .index_of(to)
            .ok_or_else(|| LedgerError::UnknownIdentity(to.to_string()))?;

        let available = self.roster.account(src).balance();
        if count > available {
            return Err(LedgerError::InsufficientBalance {
                user: from.to_string(),
                available,
                requested: count,
            });
        }

        let mut receipt = TransferReceipt {
            from: from.to_string(),
            to: to.to_string(),
            moved: Vec::new(),
        };
        if src == dst || count == 0 {
            debug!(from, to, count, "Transfer is a no-op");
            return Ok(receipt);
        }

        receipt.moved = self.store.move_oldest(from, to, count as usize);
        if receipt.moved.len() as u64 != count {
            // balance == owned coins, so the store always has enough
            return Err(LedgerError::InvariantViolation(format!(
                "{} holds {} coins but only {} were found",
                from,
                available,
                receipt.moved.len()
            )));
        }
        for id in &receipt.moved {
            debug!(coin = %id, owner = to, "Coin new owner");
        }

        self.roster.debit(src, count);
        self.roster.credit(dst, count);
        info!(from, to, count, "Coins transferred");

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_core::Person;

    fn funded() -> CoinLedger {
        let mut ledger = CoinLedger::new(vec![
            Person::new("A", 1).unwrap(),
            Person::new("B", 9).unwrap(),
        ])
        .unwrap();
        ledger.emit(10).unwrap();
        ledger
    }

    #[test]
    fn test_transfer_moves_balance_and_history() {
        let mut ledger = funded();
        let receipt = ledger.transfer("B", "A", 5).unwrap();

        assert_eq!(receipt.moved.len(), 5);
        assert_eq!(ledger.roster().balance("A"), Some(6));
        assert_eq!(ledger.roster().balance("B"), Some(4));
        for id in &receipt.moved {
            let entry = ledger.store().get(id).unwrap();
            assert_eq!(entry.owner(), "A");
            assert_eq!(entry.coin().history_len(), 2);
            assert_eq!(entry.coin().history_text(), "Emission ==> B\nB ==> A\n");
        }
    }

    #[test]
    fn test_transfer_selects_oldest_first() {
        let mut ledger = funded();
        let oldest: Vec<CoinId> = ledger
            .store()
            .owned_by("B")
            .take(3)
            .map(|e| e.coin().id())
            .collect();

        let receipt = ledger.transfer("B", "A", 3).unwrap();
        assert_eq!(receipt.moved, oldest);
    }

    #[test]
    fn test_unknown_destination() {
        let mut ledger = funded();
        assert_eq!(
            ledger.transfer("A", "C", 1).unwrap_err(),
            LedgerError::UnknownIdentity("C".to_string())
        );
    }

    #[test]
    fn test_unknown_source_checked_first() {
        let mut ledger = funded();
        assert_eq!(
            ledger.transfer("X", "Y", 1).unwrap_err(),
            LedgerError::UnknownIdentity("X".to_string())
        );
    }

    #[test]
    fn test_insufficient_balance_leaves_state() {
        let mut ledger = funded();
        let err = ledger.transfer("A", "B", 2).unwrap_err();

        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                user: "A".to_string(),
                available: 1,
                requested: 2
            }
        );
        assert_eq!(ledger.roster().balance("A"), Some(1));
        assert!(ledger.store().iter().all(|e| e.coin().history_len() == 1));
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let mut ledger = funded();
        let receipt = ledger.transfer("B", "B", 4).unwrap();

        assert!(receipt.moved.is_empty());
        assert_eq!(ledger.roster().balance("B"), Some(9));
        assert!(ledger.store().iter().all(|e| e.coin().history_len() == 1));
    }

    #[test]
    fn test_self_transfer_still_checks_balance() {
        let mut ledger = funded();
        assert!(matches!(
            ledger.transfer("A", "A", 2),
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_zero_transfer_is_noop() {
        let mut ledger = funded();
        let receipt = ledger.transfer("A", "B", 0).unwrap();
        assert!(receipt.moved.is_empty());
        assert_eq!(ledger.roster().balance("A"), Some(1));
    }
}
