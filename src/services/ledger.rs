//! Ledger service
//!
//! The `Ledger` owns the account namespace of one ledger file and is the
//! only writer of new transactions.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info};

use crate::config::Settings;
use crate::display::format_roster;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountRecord, AccountType, Money, Transaction, TransferRequest};
use crate::services::account::{Account, AccountSummary};
use crate::storage::{read_yaml, NewTransaction, Storage};

/// Transfer endpoint: an account view or a bare account name
#[derive(Debug, Clone, Copy)]
pub enum AccountRef<'r> {
    Name(&'r str),
    Account(&'r Account<'r>),
}

impl<'r> AccountRef<'r> {
    fn name(&self) -> &'r str {
        match *self {
            AccountRef::Name(name) => name,
            AccountRef::Account(account) => account.name(),
        }
    }
}

impl<'r> From<&'r str> for AccountRef<'r> {
    fn from(name: &'r str) -> Self {
        AccountRef::Name(name)
    }
}

impl<'r> From<&'r String> for AccountRef<'r> {
    fn from(name: &'r String) -> Self {
        AccountRef::Name(name.as_str())
    }
}

impl<'r, 'a> From<&'r Account<'a>> for AccountRef<'r> {
    fn from(account: &'r Account<'a>) -> Self {
        AccountRef::Account(account)
    }
}

/// Logical date of a transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferDate {
    /// `YYYY-MM-DD`, taken as midnight
    Text(String),
    /// A calendar date, taken as midnight
    Date(NaiveDate),
    /// Used as is
    DateTime(NaiveDateTime),
}

impl TransferDate {
    fn resolve(&self) -> LedgerResult<NaiveDateTime> {
        match self {
            TransferDate::Text(text) => {
                let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
                    LedgerError::InvalidArgument(format!(
                        "Invalid date '{}': expected YYYY-MM-DD",
                        text
                    ))
                })?;
                Ok(date.and_time(NaiveTime::MIN))
            }
            TransferDate::Date(date) => Ok(date.and_time(NaiveTime::MIN)),
            TransferDate::DateTime(date_time) => Ok(*date_time),
        }
    }
}

impl From<&str> for TransferDate {
    fn from(text: &str) -> Self {
        TransferDate::Text(text.to_string())
    }
}

impl From<NaiveDate> for TransferDate {
    fn from(date: NaiveDate) -> Self {
        TransferDate::Date(date)
    }
}

impl From<NaiveDateTime> for TransferDate {
    fn from(date_time: NaiveDateTime) -> Self {
        TransferDate::DateTime(date_time)
    }
}

/// Arguments of a transfer
#[derive(Debug, Clone)]
pub struct TransferInput<'r> {
    pub amount: Money,
    pub source: Option<AccountRef<'r>>,
    pub destination: Option<AccountRef<'r>>,
    pub description: Option<String>,
    pub date: Option<TransferDate>,
    pub show_summary: bool,
}

impl<'r> TransferInput<'r> {
    /// Transfer between two accounts, dated now, with a summary
    pub fn new(
        amount: Money,
        source: impl Into<AccountRef<'r>>,
        destination: impl Into<AccountRef<'r>>,
    ) -> Self {
        Self {
            amount,
            source: Some(source.into()),
            destination: Some(destination.into()),
            description: None,
            date: None,
            show_summary: true,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: impl Into<TransferDate>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn show_summary(mut self, show: bool) -> Self {
        self.show_summary = show;
        self
    }
}

/// Result of a transfer
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    pub transaction: Transaction,
    /// Tail of the source and destination statements, when requested
    pub summary: Option<String>,
}

/// Result of applying a batch of transfer requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub recorded: usize,
    pub skipped: usize,
}

/// The ledger aggregate over one file
#[derive(Debug)]
pub struct Ledger {
    storage: Storage,
    settings: Settings,
}

impl Ledger {
    /// Open an existing ledger file
    pub fn open(path: impl Into<PathBuf>, settings: Settings) -> LedgerResult<Self> {
        let storage = Storage::open(path)?;
        info!(
            path = %storage.path().display(),
            accounts = storage.accounts.count()?,
            transactions = storage.transactions.count()?,
            "opened ledger"
        );
        Ok(Self::from_storage(storage, settings))
    }

    /// Create a new, empty ledger file
    pub fn create(path: impl Into<PathBuf>, settings: Settings) -> LedgerResult<Self> {
        let storage = Storage::create(path)?;
        info!(path = %storage.path().display(), "created ledger");
        Ok(Self::from_storage(storage, settings))
    }

    pub fn from_storage(storage: Storage, settings: Settings) -> Self {
        Self { storage, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Open a new account.
    ///
    /// Without a type the configured default is used.
    pub fn open_account(
        &self,
        name: &str,
        account_type: Option<AccountType>,
        opening_balance: Money,
    ) -> LedgerResult<Account<'_>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidArgument(
                "Account name cannot be empty".into(),
            ));
        }

        let account_type = account_type.unwrap_or(self.settings.default_account_type);
        self.storage.accounts.insert(AccountRecord::new(
            name,
            Some(account_type),
            opening_balance,
        ))?;
        if let Err(e) = self.storage.save() {
            self.storage.accounts.remove(name)?;
            return Err(e);
        }

        info!(account = name, %account_type, %opening_balance, "opened account");
        Account::new(&self.storage, name)
    }

    /// View of a known account
    pub fn lookup(&self, name: &str) -> LedgerResult<Account<'_>> {
        Account::new(&self.storage, name)
    }

    /// Names of all accounts, sorted
    pub fn account_names(&self) -> LedgerResult<Vec<String>> {
        self.storage.accounts.names()
    }

    /// Views of all accounts, sorted by name
    pub fn accounts(&self) -> LedgerResult<Vec<Account<'_>>> {
        self.account_names()?
            .iter()
            .map(|name| Account::new(&self.storage, name))
            .collect()
    }

    fn resolve(&self, endpoint: Option<AccountRef<'_>>, role: &str) -> LedgerResult<String> {
        let name = endpoint
            .ok_or_else(|| LedgerError::InvalidArgument(format!("No {} account given", role)))?
            .name();

        if !self.storage.accounts.exists(name)? {
            return Err(LedgerError::UnknownAccount(name.to_string()));
        }
        Ok(name.to_string())
    }

    /// Record a transfer between two known accounts
    pub fn transfer(&self, input: TransferInput<'_>) -> LedgerResult<TransferOutcome> {
        let source = self.resolve(input.source, "source")?;
        let destination = self.resolve(input.destination, "destination")?;

        let date = match &input.date {
            Some(date) => date.resolve()?,
            None => Local::now().naive_local(),
        };

        let transaction = self.storage.transactions.append(NewTransaction {
            source,
            destination,
            amount: input.amount,
            description: input.description.unwrap_or_default(),
            date,
        })?;
        if let Err(e) = self.storage.save() {
            self.storage.transactions.revert_append(&transaction)?;
            return Err(e);
        }

        info!(
            id = %transaction.id,
            source = %transaction.source,
            destination = %transaction.destination,
            amount = %transaction.amount,
            "recorded transfer"
        );

        let summary = if input.show_summary {
            Some(self.transfer_summary(&transaction)?)
        } else {
            None
        };

        Ok(TransferOutcome {
            transaction,
            summary,
        })
    }

    fn transfer_summary(&self, transaction: &Transaction) -> LedgerResult<String> {
        let limit = Some(self.settings.summary_lines);
        let source = self.lookup(&transaction.source)?.render_statement(limit)?;
        let destination = self
            .lookup(&transaction.destination)?
            .render_statement(limit)?;
        Ok(format!("{}\n{}", source, destination))
    }

    /// Summaries of all accounts, sorted by name
    pub fn summaries(&self) -> LedgerResult<Vec<AccountSummary>> {
        self.accounts()?.iter().map(|a| a.summary()).collect()
    }

    /// All accounts grouped by type with display balances
    pub fn render_roster(&self) -> LedgerResult<String> {
        Ok(format_roster(&self.summaries()?))
    }

    /// Record a batch of transfer requests in order.
    ///
    /// Requests still pointing at the unassigned placeholder are skipped
    /// when `skip_unassigned` is set. A failure stops the batch; requests
    /// before it stay recorded.
    pub fn apply_requests(
        &self,
        requests: &[TransferRequest],
        skip_unassigned: bool,
    ) -> LedgerResult<ApplySummary> {
        let mut summary = ApplySummary::default();

        for request in requests {
            if skip_unassigned && request.is_unassigned(&self.settings.unassigned_account) {
                debug!(from = %request.from, to = %request.to, "skipping unassigned request");
                summary.skipped += 1;
                continue;
            }

            let mut input = TransferInput::new(request.amount, &request.from, &request.to)
                .description(request.description.clone())
                .show_summary(false);
            if let Some(date) = request.date {
                input = input.date(date);
            }

            self.transfer(input)?;
            summary.recorded += 1;
        }

        info!(
            recorded = summary.recorded,
            skipped = summary.skipped,
            "applied transfer requests"
        );
        Ok(summary)
    }

    /// Read a YAML list of transfer requests and record them
    pub fn apply_file(&self, path: &Path, skip_unassigned: bool) -> LedgerResult<ApplySummary> {
        let requests: Vec<TransferRequest> = read_yaml(path)?;
        self.apply_requests(&requests, skip_unassigned)
    }
}
