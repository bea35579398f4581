//! Service layer for the ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! account views with derived balances, the ledger aggregate and the CSV
//! importer.

pub mod account;
pub mod import;
pub mod ledger;

pub use account::{Account, AccountSummary, PostedTransaction, RunningBalance};
pub use import::{ImportOptions, ImportReport, ImportRule, ImportService};
pub use ledger::{
    AccountRef, ApplySummary, Ledger, TransferDate, TransferInput, TransferOutcome,
};
