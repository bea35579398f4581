//! Transaction identifiers
//!
//! Transactions are numbered by the store in insertion order, so the id also
//! breaks ties between transactions that share a date.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential transaction id, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// The id given to the first transaction of a fresh ledger
    pub const FIRST: TransactionId = TransactionId(1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id following this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0.to_string())
    }
}
