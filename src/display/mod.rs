//! Display formatting for terminal output
//!
//! Turns account history and balances into the fixed-width text reports
//! printed by the CLI.

pub mod roster;
pub mod statement;

pub use roster::format_roster;
pub use statement::{format_statement, format_statement_header, format_statement_line};
