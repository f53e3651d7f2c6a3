//! Success/failure envelope returned by every mutating call

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum Status {
    Ok,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    pub comment: String,
}

impl Response {
    pub fn ok(comment: impl Into<String>) -> Self {
        Self {
            status: Status::Ok,
            comment: comment.into(),
        }
    }

    pub fn failed(comment: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            comment: comment.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
