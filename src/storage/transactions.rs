//! Transaction repository
//!
//! Holds the append-only `transactions` table in memory with an index from
//! account name to the transactions touching it.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::error::LedgerError;
use crate::models::{Money, Transaction, TransactionId};

use super::lock_error;

/// Repository for transaction rows with indexing
#[derive(Debug, Default)]
pub struct TransactionRepository {
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: account name -> transaction ids, in insertion order
    by_account: RwLock<HashMap<String, Vec<TransactionId>>>,
    next_id: RwLock<TransactionId>,
}

/// Fields of a transaction about to be appended
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub source: String,
    pub destination: String,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDateTime,
}

fn index(by_account: &mut HashMap<String, Vec<TransactionId>>, txn: &Transaction) {
    by_account.entry(txn.source.clone()).or_default().push(txn.id);
    if txn.destination != txn.source {
        by_account
            .entry(txn.destination.clone())
            .or_default()
            .push(txn.id);
    }
}

impl TransactionRepository {
    /// Create an empty transaction repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with rows read from the ledger file and rebuild
    /// the index
    pub fn load(
        &self,
        transactions: Vec<Transaction>,
        next_id: TransactionId,
    ) -> Result<(), LedgerError> {
        let mut sorted = transactions;
        sorted.sort_by_key(|t| t.id);

        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(LedgerError::Storage(format!(
                "duplicate transaction id {}",
                pair[0].id.value()
            )));
        }

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_account = self.by_account.write().map_err(lock_error)?;
        let mut next = self.next_id.write().map_err(lock_error)?;

        data.clear();
        by_account.clear();

        // Never reuse an id, even if the stored counter lags behind the rows
        *next = sorted
            .last()
            .map(|t| t.id.next())
            .filter(|candidate| *candidate > next_id)
            .unwrap_or(next_id);

        for txn in sorted {
            index(&mut by_account, &txn);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// All rows in insertion order, ready to be written back
    pub fn snapshot(&self) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by_key(|t| t.id);
        Ok(transactions)
    }

    /// The id the next appended transaction will receive
    pub fn next_id(&self) -> Result<TransactionId, LedgerError> {
        let next = self.next_id.read().map_err(lock_error)?;
        Ok(*next)
    }

    /// Append a transaction, assigning it the next id
    pub fn append(&self, new: NewTransaction) -> Result<Transaction, LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_account = self.by_account.write().map_err(lock_error)?;
        let mut next = self.next_id.write().map_err(lock_error)?;

        let mut txn = Transaction::new(*next, new.source, new.destination, new.amount, new.date);
        txn.description = new.description;
        *next = next.next();

        index(&mut by_account, &txn);
        data.insert(txn.id, txn.clone());

        Ok(txn)
    }

    /// Take back the most recent append and give its id out again
    ///
    /// Only the last appended transaction can be reverted.
    pub fn revert_append(&self, txn: &Transaction) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_account = self.by_account.write().map_err(lock_error)?;
        let mut next = self.next_id.write().map_err(lock_error)?;

        if txn.id.next() != *next || !data.contains_key(&txn.id) {
            return Err(LedgerError::Storage(format!(
                "transaction {} is not the latest",
                txn.id.value()
            )));
        }

        data.remove(&txn.id);
        for name in [&txn.source, &txn.destination] {
            if let Some(ids) = by_account.get_mut(name) {
                ids.retain(|id| *id != txn.id);
                if ids.is_empty() {
                    by_account.remove(name);
                }
            }
        }
        *next = txn.id;

        Ok(())
    }

    /// Transactions where the account is source or destination, ordered by
    /// date with ties kept in insertion order
    pub fn get_by_account(&self, account: &str) -> Result<Vec<Transaction>, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_account = self.by_account.read().map_err(lock_error)?;

        let ids = by_account.get(account).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(transactions)
    }

    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn on(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn new_txn(source: &str, destination: &str, cents: i64, day: u32) -> NewTransaction {
        NewTransaction {
            source: source.into(),
            destination: destination.into(),
            amount: Money::from_cents(cents),
            description: String::new(),
            date: on(day),
        }
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let repo = TransactionRepository::new();
        let first = repo.append(new_txn("bank", "rent", 100, 1)).unwrap();
        let second = repo.append(new_txn("bank", "food", 200, 1)).unwrap();

        assert_eq!(first.id, TransactionId::FIRST);
        assert_eq!(second.id, TransactionId::new(2));
        assert_eq!(repo.next_id().unwrap(), TransactionId::new(3));
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_get_by_account_orders_by_date_then_insertion() {
        let repo = TransactionRepository::new();
        repo.append(new_txn("bank", "rent", 100, 5)).unwrap();
        repo.append(new_txn("bank", "food", 200, 2)).unwrap();
        repo.append(new_txn("salary", "bank", 300, 5)).unwrap();
        repo.append(new_txn("salary", "food", 400, 1)).unwrap();

        let ids: Vec<u64> = repo
            .get_by_account("bank")
            .unwrap()
            .iter()
            .map(|t| t.id.value())
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_self_transfer_indexed_once() {
        let repo = TransactionRepository::new();
        repo.append(new_txn("bank", "bank", 100, 1)).unwrap();
        assert_eq!(repo.get_by_account("bank").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_account_has_no_transactions() {
        let repo = TransactionRepository::new();
        assert!(repo.get_by_account("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_load_never_reuses_ids() {
        let repo = TransactionRepository::new();
        let txn = Transaction::new(TransactionId::new(7), "bank", "rent", Money::from_cents(1), on(1));

        repo.load(vec![txn], TransactionId::FIRST).unwrap();
        assert_eq!(repo.next_id().unwrap(), TransactionId::new(8));

        let appended = repo.append(new_txn("bank", "rent", 1, 2)).unwrap();
        assert_eq!(appended.id, TransactionId::new(8));
        let ids: Vec<u64> = repo.snapshot().unwrap().iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let repo = TransactionRepository::new();
        repo.append(new_txn("bank", "rent", 500, 1)).unwrap();

        let first = Transaction::new(TransactionId::FIRST, "a", "b", Money::from_cents(1000), on(1));
        let second = Transaction::new(TransactionId::FIRST, "a", "c", Money::from_cents(2000), on(2));
        let err = repo
            .load(vec![first, second], TransactionId::new(2))
            .unwrap_err();

        assert!(matches!(err, LedgerError::Storage(ref msg) if msg == "duplicate transaction id 1"));
        // Rejected rows leave the previous contents in place
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get_by_account("a").unwrap().is_empty());
    }

    #[test]
    fn test_revert_append() {
        let repo = TransactionRepository::new();
        repo.append(new_txn("bank", "rent", 100, 1)).unwrap();
        let second = repo.append(new_txn("bank", "food", 200, 2)).unwrap();

        repo.revert_append(&second).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.next_id().unwrap(), TransactionId::new(2));
        assert_eq!(repo.get_by_account("bank").unwrap().len(), 1);
        assert!(repo.get_by_account("food").unwrap().is_empty());

        let again = repo.append(new_txn("bank", "food", 300, 3)).unwrap();
        assert_eq!(again.id, TransactionId::new(2));
    }

    #[test]
    fn test_revert_append_only_takes_back_the_latest() {
        let repo = TransactionRepository::new();
        let first = repo.append(new_txn("bank", "rent", 100, 1)).unwrap();
        repo.append(new_txn("bank", "food", 200, 2)).unwrap();

        assert!(repo.revert_append(&first).is_err());
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_load_keeps_larger_stored_counter() {
        let repo = TransactionRepository::new();
        repo.load(Vec::new(), TransactionId::new(12)).unwrap();
        assert_eq!(repo.next_id().unwrap(), TransactionId::new(12));
    }
}
