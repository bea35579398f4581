//! Account repository
//!
//! Holds the `accounts` table of the ledger file in memory, keyed by name.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::AccountRecord;

use super::lock_error;

/// Repository for account rows
#[derive(Debug, Default)]
pub struct AccountRepository {
    data: RwLock<BTreeMap<String, AccountRecord>>,
}

impl AccountRepository {
    /// Create an empty account repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with rows read from the ledger file
    pub fn load(&self, accounts: Vec<AccountRecord>) -> Result<(), LedgerError> {
        let mut loaded = BTreeMap::new();
        for account in accounts {
            if loaded.contains_key(&account.name) {
                return Err(LedgerError::Storage(format!(
                    "duplicate account name {}",
                    account.name
                )));
            }
            loaded.insert(account.name.clone(), account);
        }

        let mut data = self.data.write().map_err(lock_error)?;
        *data = loaded;

        Ok(())
    }

    /// All rows, ordered by name, ready to be written back
    pub fn snapshot(&self) -> Result<Vec<AccountRecord>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().cloned().collect())
    }

    /// Get an account by exact name
    pub fn get(&self, name: &str) -> Result<Option<AccountRecord>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(name).cloned())
    }

    /// Names of all accounts, sorted
    pub fn names(&self) -> Result<Vec<String>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.keys().cloned().collect())
    }

    /// Insert a new account; fails if the name is taken
    pub fn insert(&self, account: AccountRecord) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;

        if data.contains_key(&account.name) {
            return Err(LedgerError::DuplicateAccount(account.name));
        }

        data.insert(account.name.clone(), account);
        Ok(())
    }

    /// Replace an existing account row; fails if the name is unknown
    pub fn update(&self, account: AccountRecord) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;

        match data.get_mut(&account.name) {
            Some(existing) => {
                *existing = account;
                Ok(())
            }
            None => Err(LedgerError::UnknownAccount(account.name)),
        }
    }

    /// Remove an account row, returning it if it was present
    pub fn remove(&self, name: &str) -> Result<Option<AccountRecord>, LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(name))
    }

    /// Check if an account name is registered
    pub fn exists(&self, name: &str) -> Result<bool, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.contains_key(name))
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
