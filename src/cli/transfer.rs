//! CLI command handlers for transfers
//!
//! Records single transfers between accounts and applies reviewed batches
//! of transfer requests.

use std::path::PathBuf;

use clap::Args;

use super::parse_amount;
use crate::error::LedgerResult;
use crate::services::{Ledger, TransferInput};

/// Arguments of the transfer command
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Amount to move (any sign)
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    /// Source account
    pub from: String,
    /// Destination account
    pub to: String,
    /// Description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Transaction date (YYYY-MM-DD), defaults to now
    #[arg(long)]
    pub date: Option<String>,
    /// Do not print the statement summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments of the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// YAML file of transfer requests
    pub requests: PathBuf,
    /// Skip requests still pointing at the unassigned placeholder
    #[arg(long)]
    pub skip_unassigned: bool,
}

/// Handle the transfer command
pub fn handle_transfer_command(ledger: &Ledger, args: TransferArgs) -> LedgerResult<()> {
    let amount = parse_amount(&args.amount)?;

    let mut input = TransferInput::new(amount, args.from.as_str(), args.to.as_str())
        .show_summary(!args.quiet);
    if let Some(description) = args.description {
        input = input.description(description);
    }
    if let Some(date) = args.date.as_deref() {
        input = input.date(date);
    }

    let outcome = ledger.transfer(input)?;

    println!("Recorded transfer #{}: {}", outcome.transaction.id, outcome.transaction);
    if let Some(summary) = outcome.summary {
        println!();
        println!("{}", summary);
    }

    Ok(())
}

/// Handle the apply command
pub fn handle_apply_command(ledger: &Ledger, args: ApplyArgs) -> LedgerResult<()> {
    let summary = ledger.apply_file(&args.requests, args.skip_unassigned)?;

    println!("Recorded {} transfer(s)", summary.recorded);
    if summary.skipped > 0 {
        println!(
            "Skipped {} unassigned request(s) still pointing at '{}'",
            summary.skipped,
            ledger.settings().unassigned_account
        );
    }

    Ok(())
}
