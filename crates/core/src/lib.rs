//! Billing Core - Domain types
//!
//! This crate contains the fundamental types used across Billing:
//! - `Coin`: Indivisible reward unit with its provenance history
//! - `CoinId`: Collision-free coin identity
//! - `Person`: Roster member with a positive rating
//! - `UserProfile`: Public (name, balance) view of a roster member

pub mod coin;
pub mod person;

pub use coin::{Coin, CoinId, Party, Transition};
pub use person::{Person, PersonError, UserProfile};
