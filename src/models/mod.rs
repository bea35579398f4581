//! Core data models for the ledger
//!
//! This module contains the data structures stored in the ledger file
//! (accounts, transactions, amounts, ids) and the transfer requests
//! exchanged with the importer.

pub mod account;
pub mod ids;
pub mod money;
pub mod transaction;
pub mod transfer_request;

pub use account::{AccountRecord, AccountType};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{Direction, Transaction};
pub use transfer_request::TransferRequest;
