//! Transaction model
//!
//! A single-entry transfer of money from a source account to a destination
//! account, as stored in the `transactions` table.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Which way money moved, seen from one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The account received money
    In,
    /// The account paid money out
    Out,
}

/// A recorded transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequential identifier assigned by the store
    pub id: TransactionId,

    /// Name of the account the money leaves
    pub source: String,

    /// Name of the account the money enters
    pub destination: String,

    /// Transferred amount, any sign
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    /// Logical date of the transfer
    pub date: NaiveDateTime,

    /// When the record was written
    pub date_created: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction stamped with the current time
    pub fn new(
        id: TransactionId,
        source: impl Into<String>,
        destination: impl Into<String>,
        amount: Money,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            source: source.into(),
            destination: destination.into(),
            amount,
            description: String::new(),
            date,
            date_created: Utc::now(),
        }
    }

    /// Change this transaction makes to the named account's balance.
    ///
    /// A self-transfer both debits and credits the account, netting to zero.
    pub fn effect_on(&self, account: &str) -> Money {
        let mut effect = Money::zero();
        if self.source == account {
            effect -= self.amount;
        }
        if self.destination == account {
            effect += self.amount;
        }
        effect
    }

    /// Direction of the money relative to the named account.
    ///
    /// A negative amount reverses the flow. When the account is the source
    /// the source rule decides, which also covers self-transfers.
    pub fn direction_for(&self, account: &str) -> Direction {
        let received = if self.source == account {
            self.amount.is_negative()
        } else {
            self.amount.is_positive()
        };

        if received {
            Direction::In
        } else {
            Direction::Out
        }
    }

    /// The other side of the transfer, seen from the named account
    pub fn counterparty(&self, account: &str) -> &str {
        if self.source == account {
            &self.destination
        } else {
            &self.source
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} {}",
            self.date.format("%Y-%m-%d"),
            self.source,
            self.destination,
            self.amount
        )
    }
}
