//! Configuration module for the ledger CLI
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - Loading user settings

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{CsvEncoding, Settings};
