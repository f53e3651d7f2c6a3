//! Person - Roster member and its public balance view

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building a roster member
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonError {
    #[error("User name cannot be empty")]
    EmptyName,

    #[error("Rating must be positive for user {0}")]
    InvalidRating(String),
}

/// A roster member: unique name plus rating weight.
///
/// # Invariant
/// `name` is non-empty and `rating > 0`. Enforced by [`Person::new`] and by
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPerson", into = "RawPerson")]
pub struct Person {
    name: String,
    rating: u64,
}

impl Person {
    pub fn new(name: impl Into<String>, rating: u64) -> Result<Self, PersonError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PersonError::EmptyName);
        }
        if rating == 0 {
            return Err(PersonError::InvalidRating(name));
        }
        Ok(Self { name, rating })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rating(&self) -> u64 {
        self.rating
    }
}

/// Roster file record, `{"Name": "...", "Rating": 7}`
#[derive(Serialize, Deserialize)]
struct RawPerson {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Rating")]
    rating: u64,
}

impl TryFrom<RawPerson> for Person {
    type Error = PersonError;

    fn try_from(raw: RawPerson) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.rating)
    }
}

impl From<Person> for RawPerson {
    fn from(person: Person) -> Self {
        Self {
            name: person.name,
            rating: person.rating,
        }
    }
}

/// Public view of a user: name and current coin balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_valid() {
        let p = Person::new("ALICE", 3).unwrap();
        assert_eq!(p.name(), "ALICE");
        assert_eq!(p.rating(), 3);
    }

    #[test]
    fn test_zero_rating_rejected() {
        assert_eq!(
            Person::new("ALICE", 0),
            Err(PersonError::InvalidRating("ALICE".to_string()))
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(Person::new("  ", 1), Err(PersonError::EmptyName));
    }

    #[test]
    fn test_deserialize_roster_record() {
        let p: Person = serde_json::from_str(r#"{"Name":"BOB","Rating":9}"#).unwrap();
        assert_eq!(p, Person::new("BOB", 9).unwrap());

        let bad: Result<Person, _> = serde_json::from_str(r#"{"Name":"BOB","Rating":0}"#);
        assert!(bad.is_err());
    }
}
