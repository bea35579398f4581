//! CLI command handler for CSV import
//!
//! Converts a card export into a YAML file of transfer requests for review.
//! The ledger itself is not touched; `apply` records the reviewed file.

use std::path::PathBuf;

use clap::Args;

use super::parse_date;
use crate::config::{CsvEncoding, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::services::import::load_rules;
use crate::services::{ImportOptions, ImportService};

/// Arguments of the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Card export (CSV)
    pub csv: PathBuf,
    /// YAML rule file
    #[arg(short, long)]
    pub rules: Option<PathBuf>,
    /// Output YAML file, defaults to the CSV path with a .yml extension
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Skip purchases before this date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,
    /// Account the purchases are paid from
    #[arg(long = "from")]
    pub source_account: Option<String>,
    /// File encoding (latin1, utf8)
    #[arg(long)]
    pub encoding: Option<String>,
}

/// Handle the import command
pub fn handle_import_command(settings: &Settings, args: ImportArgs) -> LedgerResult<()> {
    let mut options = ImportOptions::from_settings(settings);
    if let Some(start) = args.start_date.as_deref() {
        options.start_date = Some(parse_date(start)?);
    }
    if let Some(source) = args.source_account {
        options.source_account = source;
    }
    if let Some(encoding) = args.encoding.as_deref() {
        options.encoding = CsvEncoding::parse(encoding).ok_or_else(|| {
            LedgerError::InvalidArgument(format!(
                "Unknown encoding '{}'. Use latin1 or utf8",
                encoding
            ))
        })?;
    }

    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => Vec::new(),
    };

    let service = ImportService::new(rules, options);
    let (report, output) = service.import_file(&args.csv, args.output.as_deref())?;

    let placeholder = &service.options().unassigned_account;
    println!("Import of {}", args.csv.display());
    println!("{}", "=".repeat(40));
    println!("  Transfer requests:  {}", report.requests.len());
    println!("  Unassigned:         {}", report.unassigned_count(placeholder));
    println!("  Skipped:            {}", report.skipped());
    println!();
    println!("Written to {}", output.display());

    Ok(())
}
