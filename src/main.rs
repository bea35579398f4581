use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledger_cli::cli::{
    handle_account_command, handle_apply_command, handle_import_command,
    handle_transfer_command, show_overview, AccountCommands, ApplyArgs, ImportArgs,
    TransferArgs,
};
use ledger_cli::config::{LedgerPaths, Settings};
use ledger_cli::logging::init_tracing;
use ledger_cli::services::Ledger;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal bookkeeping ledger",
    long_about = "Records money transfers between named accounts (bank, credit, \
                  income, expense), keeps running balances and prints statements. \
                  Card exports can be imported as transfer requests, reviewed, \
                  and applied."
)]
struct Cli {
    /// Ledger file
    ledger: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new, empty ledger file
    Init,

    #[command(flatten)]
    Account(AccountCommands),

    /// Record a transfer between two accounts
    Transfer(TransferArgs),

    /// Record the transfer requests of a YAML file
    Apply(ApplyArgs),

    /// Convert a card export into a YAML file of transfer requests
    Import(ImportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_default(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            let ledger = Ledger::create(&cli.ledger, settings)?;
            println!("Created ledger: {}", ledger.path().display());
        }
        Some(Commands::Import(args)) => {
            handle_import_command(&settings, args)?;
        }
        Some(Commands::Account(cmd)) => {
            let ledger = Ledger::open(&cli.ledger, settings)?;
            handle_account_command(&ledger, cmd)?;
        }
        Some(Commands::Transfer(args)) => {
            let ledger = Ledger::open(&cli.ledger, settings)?;
            handle_transfer_command(&ledger, args)?;
        }
        Some(Commands::Apply(args)) => {
            let ledger = Ledger::open(&cli.ledger, settings)?;
            handle_apply_command(&ledger, args)?;
        }
        None => {
            let ledger = Ledger::open(&cli.ledger, settings)?;
            show_overview(&ledger)?;
        }
    }

    Ok(())
}
