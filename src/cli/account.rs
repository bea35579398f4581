//! Account CLI commands
//!
//! Implements CLI commands for opening accounts and reading their state.

use clap::Subcommand;

use super::parse_amount;
use crate::error::LedgerResult;
use crate::models::AccountType;
use crate::services::Ledger;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Open a new account
    Open {
        /// Account name
        name: String,
        /// Account type (bank, credit, income, expense); defaults to the configured type
        #[arg(short = 't', long = "type")]
        account_type: Option<String>,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
    },
    /// Show the statement of an account
    Statement {
        /// Account name
        name: String,
        /// Only show the most recent transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show the balance of an account
    Balance {
        /// Account name
        name: String,
        /// Show the ledger-internal sign, without the credit/income inversion
        #[arg(long)]
        raw: bool,
    },
    /// Change the type of an account
    SetType {
        /// Account name
        name: String,
        /// New type (bank, credit, income, expense)
        #[arg(value_name = "TYPE")]
        account_type: String,
    },
    /// Change the opening balance of an account
    SetOpeningBalance {
        /// Account name
        name: String,
        /// New opening balance
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// List all accounts grouped by type
    Roster,
}

/// Banner and roster shown when no command is given
pub fn show_overview(ledger: &Ledger) -> LedgerResult<()> {
    println!("Welcome to your ledger: {}", ledger.path().display());
    println!();
    println!("{}", ledger.render_roster()?);
    Ok(())
}

/// Handle an account command
pub fn handle_account_command(ledger: &Ledger, cmd: AccountCommands) -> LedgerResult<()> {
    match cmd {
        AccountCommands::Open {
            name,
            account_type,
            balance,
        } => {
            let account_type = account_type
                .map(|t| t.parse::<AccountType>())
                .transpose()?;
            let opening_balance = parse_amount(&balance)?;

            let account = ledger.open_account(&name, account_type, opening_balance)?;
            let record = account.record()?;

            println!("Opened account: {}", record.name);
            println!("  Type: {}", record.type_label());
            println!("  Opening Balance: {}", record.opening_balance);
        }

        AccountCommands::Statement { name, limit } => {
            let account = ledger.lookup(&name)?;
            println!("{}", account.render_statement(limit)?);
        }

        AccountCommands::Balance { name, raw } => {
            let account = ledger.lookup(&name)?;
            println!("{}", account.balance(!raw)?);
        }

        AccountCommands::SetType { name, account_type } => {
            let account = ledger.lookup(&name)?;
            let record = account.set_type(&account_type)?;
            println!("Set type of {} to {}", record.name, record.type_label());
        }

        AccountCommands::SetOpeningBalance { name, amount } => {
            let account = ledger.lookup(&name)?;
            let record = account.set_opening_balance(parse_amount(&amount)?)?;
            println!(
                "Set opening balance of {} to {}",
                record.name, record.opening_balance
            );
        }

        AccountCommands::Roster => {
            println!("{}", ledger.render_roster()?);
        }
    }

    Ok(())
}
