//! Storage layer for the ledger
//!
//! A ledger lives in a single JSON file holding two tables, `accounts` and
//! `transactions`. The tables are loaded into memory on open and the whole
//! file is rewritten atomically after every change.

pub mod accounts;
pub mod file_io;
pub mod transactions;

pub use accounts::AccountRepository;
pub use file_io::{read_json_required, read_yaml, write_json_atomic, write_yaml};
pub use transactions::{NewTransaction, TransactionRepository};

use std::fmt::Display;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::models::{AccountRecord, Transaction, TransactionId};

pub(crate) fn lock_error<E: Display>(e: E) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire lock: {}", e))
}

/// On-disk layout of a ledger file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    next_transaction_id: TransactionId,
    #[serde(default)]
    accounts: Vec<AccountRecord>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// Storage coordinator for one ledger file
#[derive(Debug)]
pub struct Storage {
    path: PathBuf,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Open an existing ledger file
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let file: LedgerFile = read_json_required(&path)?;

        let storage = Self {
            path,
            accounts: AccountRepository::new(),
            transactions: TransactionRepository::new(),
        };
        storage.accounts.load(file.accounts)?;
        storage
            .transactions
            .load(file.transactions, file.next_transaction_id)?;

        Ok(storage)
    }

    /// Create a new, empty ledger file; fails if the file exists
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        if path.exists() {
            return Err(LedgerError::Storage(format!(
                "Ledger file already exists: {}",
                path.display()
            )));
        }

        let storage = Self {
            path,
            accounts: AccountRepository::new(),
            transactions: TransactionRepository::new(),
        };
        storage.save()?;
        Ok(storage)
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write both tables back to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let file = LedgerFile {
            next_transaction_id: self.transactions.next_id()?,
            accounts: self.accounts.snapshot()?,
            transactions: self.transactions.snapshot()?,
        };
        write_json_atomic(&self.path, &file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_then_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("home.ledger");

        let storage = Storage::create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(storage.accounts.count().unwrap(), 0);

        let reopened = Storage::open(&path).unwrap();
        assert_eq!(reopened.transactions.count().unwrap(), 0);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("home.ledger");
        fs::write(&path, "{}").unwrap();

        assert!(Storage::create(&path).is_err());
    }

    #[test]
    fn test_open_missing_or_invalid_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.ledger");
        assert!(Storage::open(&missing).is_err());

        let invalid = temp_dir.path().join("invalid.ledger");
        fs::write(&invalid, "accounts: nope").unwrap();
        assert!(matches!(
            Storage::open(&invalid).unwrap_err(),
            LedgerError::Storage(_)
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("home.ledger");
        let storage = Storage::create(&path).unwrap();

        storage
            .accounts
            .insert(AccountRecord::new(
                "bank",
                Some(AccountType::Bank),
                Money::from_cents(100000),
            ))
            .unwrap();
        storage
            .transactions
            .append(NewTransaction {
                source: "bank".into(),
                destination: "groceries".into(),
                amount: Money::from_cents(5025),
                description: "Market".into(),
                date: NaiveDate::from_ymd_opt(2024, 1, 10)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            })
            .unwrap();
        storage.save().unwrap();

        let reopened = Storage::open(&path).unwrap();
        let bank = reopened.accounts.get("bank").unwrap().unwrap();
        assert_eq!(bank.opening_balance.cents(), 100000);

        let txns = reopened.transactions.get_by_account("groceries").unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount.cents(), 5025);
        assert_eq!(txns[0].description, "Market");
        assert_eq!(reopened.transactions.next_id().unwrap(), TransactionId::new(2));
    }

    #[test]
    fn test_open_file_written_by_hand() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hand.ledger");
        fs::write(
            &path,
            r#"{"accounts": [{"name": "cash", "opening_balance": 20}, {"name": "food", "type": "expense"}]}"#,
        )
        .unwrap();

        let storage = Storage::open(&path).unwrap();
        let cash = storage.accounts.get("cash").unwrap().unwrap();
        assert_eq!(cash.opening_balance.cents(), 2000);
        assert_eq!(cash.account_type, None);
        assert_eq!(storage.transactions.next_id().unwrap(), TransactionId::FIRST);
    }

    #[test]
    fn test_open_rejects_repeated_rows() {
        let temp_dir = TempDir::new().unwrap();
        let row = |amount: u32| {
            format!(
                r#"{{"id": 1, "source": "a", "destination": "b", "amount": {}, "date": "2024-01-10T00:00:00", "date_created": "2024-01-10T08:00:00Z"}}"#,
                amount
            )
        };

        let repeated_id = temp_dir.path().join("ids.ledger");
        fs::write(
            &repeated_id,
            format!(
                r#"{{"next_transaction_id": 2, "accounts": [{{"name": "a"}}, {{"name": "b"}}], "transactions": [{}, {}]}}"#,
                row(10),
                row(20)
            ),
        )
        .unwrap();
        let err = Storage::open(&repeated_id).unwrap_err();
        assert_eq!(err.to_string(), "Storage error: duplicate transaction id 1");

        let repeated_name = temp_dir.path().join("names.ledger");
        fs::write(
            &repeated_name,
            r#"{"accounts": [{"name": "a", "opening_balance": 5}, {"name": "a"}]}"#,
        )
        .unwrap();
        let err = Storage::open(&repeated_name).unwrap_err();
        assert_eq!(err.to_string(), "Storage error: duplicate account name a");
    }
}
