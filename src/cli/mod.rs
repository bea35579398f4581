//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod import;
pub mod transfer;

pub use account::{handle_account_command, show_overview, AccountCommands};
pub use import::{handle_import_command, ImportArgs};
pub use transfer::{handle_apply_command, handle_transfer_command, ApplyArgs, TransferArgs};

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Parse an amount argument such as `50.25` or `-20`
pub(crate) fn parse_amount(value: &str) -> LedgerResult<Money> {
    Money::parse(value).map_err(|e| {
        LedgerError::InvalidArgument(format!(
            "Invalid amount '{}'. Use a format like '100.00' or '100'. Error: {}",
            value, e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date argument
pub(crate) fn parse_date(value: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::InvalidArgument(format!("Invalid date '{}'. Use YYYY-MM-DD", value))
    })
}
