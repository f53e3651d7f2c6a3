//! Roster file loading
//!
//! Format: `{"Person": [{"Name": "ALICE", "Rating": 3}, ...]}`

use billing_core::Person;
use billing_ledger::{CoinLedger, LedgerError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Failed to read roster: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid roster: {0}")]
    Ledger(#[from] LedgerError),
}

#[derive(Deserialize)]
struct RosterFile {
    #[serde(rename = "Person")]
    person: Vec<Person>,
}

/// Parse roster JSON into its members, in file order
pub fn parse_roster(json: &str) -> Result<Vec<Person>, RosterError> {
    let file: RosterFile = serde_json::from_str(json)?;
    Ok(file.person)
}

/// Read the roster at `path` and build an empty ledger over it
pub fn load_roster(path: impl AsRef<Path>) -> Result<CoinLedger, RosterError> {
    let path = path.as_ref();
    let people = parse_roster(&fs::read_to_string(path)?)?;
    let ledger = CoinLedger::new(people)?;
    info!(path = %path.display(), users = ledger.roster().len(), "Roster loaded");
    Ok(ledger)
}
