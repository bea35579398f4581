//! ledger-cli - personal bookkeeping ledger
//!
//! Records transfers of money between named accounts (bank, credit, income,
//! expense) in a single JSON ledger file, derives running balances on every
//! read and renders statements and an account roster. A companion importer
//! turns a UBS Visa card export into transfer requests.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, amounts)
//! - `storage`: JSON file storage layer
//! - `services`: Account views, the ledger aggregate and the CSV importer
//! - `display`: Statement and roster formatting
//! - `cli`: Command handlers for the `ledger` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use ledger_cli::config::Settings;
//! use ledger_cli::models::{AccountType, Money};
//! use ledger_cli::services::{Ledger, TransferInput};
//!
//! let ledger = Ledger::create("home.ledger", Settings::default())?;
//! ledger.open_account("bank", Some(AccountType::Bank), Money::from_cents(100_000))?;
//! ledger.open_account("groceries", None, Money::zero())?;
//! ledger.transfer(TransferInput::new(Money::from_cents(5025), "bank", "groceries"))?;
//! println!("{}", ledger.lookup("bank")?.render_statement(None)?);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use services::Ledger;
