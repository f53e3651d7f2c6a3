//! Coin - Indivisible reward unit with an append-only provenance trail
//!
//! Every coin starts life with exactly one transition, `Emission ==> owner`.
//! Transfers append one transition each; nothing is ever removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique coin identity.
///
/// Backed by a random v4 UUID, so ids do not depend on wall-clock ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(Uuid);

impl CoinId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CoinId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Origin side of a transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The coin was minted by an emission
    Emission,
    /// The coin was held by the named user
    User(String),
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Emission => write!(f, "Emission"),
            Party::User(name) => write!(f, "{}", name),
        }
    }
}

/// A single ownership change in a coin's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Party,
    pub to: String,
    pub at: DateTime<Utc>,
}

impl Transition {
    pub fn new(from: Party, to: impl Into<String>) -> Self {
        Self {
            from,
            to: to.into(),
            at: Utc::now(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ==> {}", self.from, self.to)
    }
}

/// An indivisible coin and its provenance trail.
///
/// # Invariant
/// `history` is never empty and its first record is always an emission.
/// The only constructor is [`Coin::emit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coin {
    id: CoinId,
    history: Vec<Transition>,
}

impl Coin {
    /// Mint a new coin owned by `owner`
    pub fn emit(owner: impl Into<String>) -> Self {
        Self {
            id: CoinId::new(),
            history: vec![Transition::new(Party::Emission, owner)],
        }
    }

    #[inline]
    pub fn id(&self) -> CoinId {
        self.id
    }

    /// Ownership transitions, oldest first
    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Number of transitions recorded so far (always >= 1)
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Append a `from ==> to` record
    pub fn record_transfer(&mut self, from: &str, to: &str) {
        self.history
            .push(Transition::new(Party::User(from.to_string()), to));
    }

    /// Render the history one transition per line, e.g.
    /// `"Emission ==> ALICE\nALICE ==> BOB\n"`.
    pub fn history_text(&self) -> String {
        self.history
            .iter()
            .map(|t| format!("{}\n", t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitted_coin_has_single_emission_record() {
        let coin = Coin::emit("ALICE");
        assert_eq!(coin.history_len(), 1);
        assert_eq!(coin.history()[0].from, Party::Emission);
        assert_eq!(coin.history()[0].to, "ALICE");
    }

    #[test]
    fn test_history_text_format() {
        let mut coin = Coin::emit("ALICE");
        coin.record_transfer("ALICE", "BOB");
        assert_eq!(coin.history_text(), "Emission ==> ALICE\nALICE ==> BOB\n");
        assert_eq!(coin.history_len(), 2);
    }

    #[test]
    fn test_coin_ids_are_unique() {
        let ids: std::collections::HashSet<CoinId> =
            (0..1000).map(|_| Coin::emit("A").id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_coin_id_serializes_as_plain_uuid() {
        let id = CoinId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
