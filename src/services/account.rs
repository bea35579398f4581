//! Account view
//!
//! An `Account` is a handle on one account name in the ledger. It holds no
//! state of its own: history and balances are recomputed from the
//! transaction table on every call.

use tracing::info;

use crate::display::format_statement;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountRecord, AccountType, Money, Transaction};
use crate::storage::Storage;

/// A transaction together with the account balance right after it
#[derive(Debug, Clone, PartialEq)]
pub struct PostedTransaction {
    pub transaction: Transaction,
    /// Raw running balance, without display convention
    pub balance: Money,
}

/// Iterator over an account's history with a running balance.
///
/// Cloning restarts from the current position, so a fresh clone taken
/// before iteration can replay the whole history.
#[derive(Debug, Clone)]
pub struct RunningBalance {
    account: String,
    balance: Money,
    remaining: std::vec::IntoIter<Transaction>,
}

impl RunningBalance {
    fn new(account: &str, opening_balance: Money, history: Vec<Transaction>) -> Self {
        Self {
            account: account.to_string(),
            balance: opening_balance,
            remaining: history.into_iter(),
        }
    }
}

impl Iterator for RunningBalance {
    type Item = PostedTransaction;

    fn next(&mut self) -> Option<Self::Item> {
        let transaction = self.remaining.next()?;
        // Overflow was ruled out when the history was loaded
        self.balance += transaction.effect_on(&self.account);
        Some(PostedTransaction {
            transaction,
            balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining.size_hint()
    }
}

impl ExactSizeIterator for RunningBalance {}

/// Summary of an account with computed fields
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: AccountRecord,
    /// Raw balance after the last transaction
    pub balance: Money,
}

impl AccountSummary {
    /// Balance with this account's display convention applied
    pub fn display_balance(&self) -> Money {
        self.account.display_balance(self.balance)
    }
}

/// View over one account in the ledger
#[derive(Debug, Clone)]
pub struct Account<'a> {
    storage: &'a Storage,
    name: String,
}

impl<'a> Account<'a> {
    /// Bind a view to an existing account
    pub fn new(storage: &'a Storage, name: &str) -> LedgerResult<Self> {
        if !storage.accounts.exists(name)? {
            return Err(LedgerError::UnknownAccount(name.to_string()));
        }
        Ok(Self {
            storage,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current stored row for this account
    pub fn record(&self) -> LedgerResult<AccountRecord> {
        self.storage
            .accounts
            .get(&self.name)?
            .ok_or_else(|| LedgerError::UnknownAccount(self.name.clone()))
    }

    pub fn account_type(&self) -> LedgerResult<Option<AccountType>> {
        Ok(self.record()?.account_type)
    }

    pub fn opening_balance(&self) -> LedgerResult<Money> {
        Ok(self.record()?.opening_balance)
    }

    /// History of this account in date order, each entry carrying the
    /// balance after it. Entries on the same date keep their insertion order.
    pub fn list_transactions(&self) -> LedgerResult<RunningBalance> {
        let record = self.record()?;
        let history = self.storage.transactions.get_by_account(&self.name)?;
        self.final_balance(record.opening_balance, &history)?;
        Ok(RunningBalance::new(
            &self.name,
            record.opening_balance,
            history,
        ))
    }

    /// Balance after the last transaction.
    ///
    /// With `display` set, credit and income balances come back with the
    /// sign inverted. An account without a type is never inverted.
    pub fn balance(&self, display: bool) -> LedgerResult<Money> {
        let summary = self.summary()?;
        Ok(if display {
            summary.display_balance()
        } else {
            summary.balance
        })
    }

    /// Record and raw balance in one pass
    pub fn summary(&self) -> LedgerResult<AccountSummary> {
        let account = self.record()?;
        let history = self.storage.transactions.get_by_account(&self.name)?;
        let balance = self.final_balance(account.opening_balance, &history)?;

        Ok(AccountSummary { account, balance })
    }

    /// Opening balance plus every effect, failing where a running total
    /// leaves the representable range
    fn final_balance(
        &self,
        opening_balance: Money,
        history: &[Transaction],
    ) -> LedgerResult<Money> {
        history.iter().try_fold(opening_balance, |balance, txn| {
            balance
                .checked_add(txn.effect_on(&self.name))
                .ok_or_else(|| {
                    LedgerError::Storage(format!(
                        "balance of {} overflows at transaction {}",
                        self.name, txn.id
                    ))
                })
        })
    }

    /// Formatted statement, optionally limited to the most recent lines
    pub fn render_statement(&self, limit: Option<usize>) -> LedgerResult<String> {
        let record = self.record()?;
        let posted: Vec<PostedTransaction> = self.list_transactions()?.collect();
        Ok(format_statement(&record, &posted, limit))
    }

    /// Set the account type from its name and persist
    pub fn set_type(&self, new_type: &str) -> LedgerResult<AccountRecord> {
        let account_type: AccountType = new_type.parse()?;
        self.set_account_type(account_type)
    }

    /// Set the account type and persist
    pub fn set_account_type(&self, account_type: AccountType) -> LedgerResult<AccountRecord> {
        let previous = self.record()?;
        let mut record = previous.clone();
        record.account_type = Some(account_type);
        self.update_and_save(record.clone(), previous)?;

        info!(account = %self.name, account_type = %account_type, "account type set");
        Ok(record)
    }

    /// Overwrite the opening balance and persist
    pub fn set_opening_balance(&self, value: Money) -> LedgerResult<AccountRecord> {
        let previous = self.record()?;
        let mut record = previous.clone();
        record.opening_balance = value;
        self.update_and_save(record.clone(), previous)?;

        info!(account = %self.name, opening_balance = %value, "opening balance set");
        Ok(record)
    }

    /// Store the new row; the previous one comes back if the file cannot be written
    fn update_and_save(&self, record: AccountRecord, previous: AccountRecord) -> LedgerResult<()> {
        self.storage.accounts.update(record)?;
        if let Err(e) = self.storage.save() {
            self.storage.accounts.update(previous)?;
            return Err(e);
        }
        Ok(())
    }
}
