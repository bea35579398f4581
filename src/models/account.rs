//! Account model
//!
//! Represents a named ledger account (bank, credit card, income source,
//! expense category) as it is stored in the `accounts` table.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::LedgerError;

/// Type of ledger account
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Bank account (checking, savings, cash)
    Bank,
    /// Credit card or other liability
    Credit,
    /// Source of income (salary, refunds)
    Income,
    /// Spending category
    Expense,
}

impl AccountType {
    /// All types, in roster order
    pub const ALL: [AccountType; 4] = [Self::Bank, Self::Credit, Self::Income, Self::Expense];

    /// Returns true if balances of this type are shown with the sign inverted.
    ///
    /// Credit and income accounts grow on what is, inside the ledger, a
    /// withdrawal: paying with the card or receiving a salary moves money out
    /// of them.
    pub fn inverts_display_sign(&self) -> bool {
        matches!(self, Self::Credit | Self::Income)
    }

    /// Parse account type from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Some(Self::Bank),
            "credit" => Some(Self::Credit),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Lowercase name as stored in the ledger file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "bank",
            Self::Credit => "credit",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::Expense
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LedgerError::InvalidAccountType(s.to_string()))
    }
}

/// A ledger account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Unique account name
    pub name: String,

    /// Type of account, if one was ever set
    #[serde(rename = "type", default)]
    pub account_type: Option<AccountType>,

    /// Balance before the first transaction
    #[serde(default)]
    pub opening_balance: Money,
}

impl AccountRecord {
    /// Create a new account record
    pub fn new(
        name: impl Into<String>,
        account_type: Option<AccountType>,
        opening_balance: Money,
    ) -> Self {
        Self {
            name: name.into(),
            account_type,
            opening_balance,
        }
    }

    /// Whether the display convention flips this account's sign.
    ///
    /// An unset type never inverts.
    pub fn inverts_display_sign(&self) -> bool {
        self.account_type
            .map(|t| t.inverts_display_sign())
            .unwrap_or(false)
    }

    /// Apply the display convention for this account to a raw balance
    pub fn display_balance(&self, balance: Money) -> Money {
        if self.inverts_display_sign() {
            -balance
        } else {
            balance
        }
    }

    /// Type name for reports, `unset` when no type is stored
    pub fn type_label(&self) -> &'static str {
        self.account_type.map(|t| t.as_str()).unwrap_or("unset")
    }
}

impl fmt::Display for AccountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.type_label())
    }
}
